//! # hubic-transfer
//!
//! The contract between a synchronization host and its storage backends.
//!
//! A backend ships a [`TransferPlugin`]. The host asks it for empty
//! [`TransferSettings`], fills them through a [`PropertyVisitor`], and turns
//! them into a [`TransferManager`] that moves [`RemoteFile`]s.

pub mod error;
pub mod manager;
pub mod remote_file;
pub mod settings;

pub use error::StorageError;
pub use manager::TransferManager;
pub use remote_file::{RemoteFile, RemoteFileFactory, RemoteFileType};
pub use settings::{
    PropertyDescriptor, PropertyLoader, PropertySaver, PropertyVisitor, TransferPlugin,
    TransferSettings,
};
