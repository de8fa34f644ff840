//! The transfer manager contract.

use std::collections::HashSet;
use std::path::Path;

use crate::error::StorageError;
use crate::remote_file::{RemoteFile, RemoteFileFactory, RemoteFileType};

/// Moves files between the local machine and one storage backend.
///
/// Implementations hold no per-call state, so every method takes `&self` and
/// a manager can be shared between threads.
pub trait TransferManager: Send + Sync {
    /// Open whatever session the backend needs.
    fn connect(&self) -> Result<(), StorageError>;

    fn disconnect(&self) -> Result<(), StorageError>;

    /// Prepare the repository layout.
    ///
    /// When `repo_file` is missing and `create_if_required` is set, the
    /// repository root is created first. The per-kind folders are always
    /// (re-)created.
    fn init(&self, create_if_required: bool, repo_file: &RemoteFile) -> Result<(), StorageError>;

    fn upload(&self, local_file: &Path, remote_file: &RemoteFile) -> Result<(), StorageError>;

    fn download(&self, remote_file: &RemoteFile, local_file: &Path) -> Result<(), StorageError>;

    /// Move a remote file. Not atomic: a failure part way may leave both
    /// source and target in place.
    fn move_file(&self, source: &RemoteFile, target: &RemoteFile) -> Result<(), StorageError>;

    /// Delete a remote file.
    ///
    /// Returns `true` once the file is gone, including when it never
    /// existed, and `false` when the backend refused.
    fn delete(&self, remote_file: &RemoteFile) -> Result<bool, StorageError>;

    /// All files of one kind, built through `factory`.
    fn list(
        &self,
        kind: RemoteFileType,
        factory: &dyn RemoteFileFactory,
    ) -> Result<HashSet<RemoteFile>, StorageError>;

    /// Folder prefix that files of `kind` are stored under.
    fn get_remote_file_path(&self, kind: RemoteFileType) -> String;

    fn test_target_exists(&self) -> Result<bool, StorageError>;

    fn test_target_can_write(&self) -> Result<bool, StorageError>;

    fn test_target_can_create(&self) -> Result<bool, StorageError>;

    fn test_repo_file_exists(&self, repo_file: &RemoteFile) -> Result<bool, StorageError>;
}
