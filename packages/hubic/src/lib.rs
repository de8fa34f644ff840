//! # hubic-plugin
//!
//! Hubic storage backend for the transfer contract in `hubic-transfer`.
//!
//! Hubic stores a repository as objects in the `default` container of an
//! OpenStack Swift account. Each kind of repository file gets its own folder:
//!
//! ```text
//! <endpoint>/default/
//!     syncany, master
//!     multichunks/  databases/  actions/  transactions/  temporary/
//! ```
//!
//! Access starts from an OAuth access token, which
//! [`HubicTransferSettings`] exchanges for a storage endpoint and token.

pub mod client;
pub mod credentials;
pub mod manager;
pub mod namespace;
pub mod outcome;
pub mod plugin;
pub mod settings;

#[cfg(test)]
mod fake;

pub use client::HubicClient;
pub use credentials::{authorization_url, fetch_credentials, new_state, Credentials};
pub use manager::HubicTransferManager;
pub use outcome::{DeleteOutcome, Existence};
pub use plugin::HubicTransferPlugin;
pub use settings::HubicTransferSettings;
