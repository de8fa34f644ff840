//! # hubic-cli
//!
//! Command line host for the Hubic backend. Credentials obtained with
//! `hubic login` are kept in a JSON settings file and reused by every other
//! command.
//!
//! ```bash
//! hubic auth-url                 # open the printed page, copy the access token
//! hubic login <ACCESS_TOKEN>
//! hubic init --create
//! hubic upload ./chunk multichunk mc-1
//! hubic ls multichunks
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use commands::run;
pub use config::{resolve_path, ConfigFile};
pub use error::CliError;
