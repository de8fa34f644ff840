//! Folder layout of a repository inside the `default` container.

use hubic_transfer::RemoteFileType;

/// Repository root, relative to the container.
pub const REPO_ROOT: &str = "";

pub const MULTICHUNKS: &str = "multichunks/";
pub const DATABASES: &str = "databases/";
pub const ACTIONS: &str = "actions/";
pub const TRANSACTIONS: &str = "transactions/";
pub const TEMPORARY: &str = "temporary/";

/// Folders created by `init`, in creation order.
pub const NAMESPACE_DIRECTORIES: [&str; 5] = [MULTICHUNKS, DATABASES, ACTIONS, TRANSACTIONS, TEMPORARY];

/// Folder prefix for files of `kind`. Kinds without a folder live at the
/// repository root.
pub fn remote_file_path(kind: RemoteFileType) -> &'static str {
    match kind {
        RemoteFileType::Multichunk => MULTICHUNKS,
        RemoteFileType::Database | RemoteFileType::Cleanup => DATABASES,
        RemoteFileType::Action => ACTIONS,
        RemoteFileType::Transaction => TRANSACTIONS,
        RemoteFileType::Temp => TEMPORARY,
        RemoteFileType::Syncany | RemoteFileType::Master => REPO_ROOT,
    }
}

/// Parent folder of an object path, without the trailing `/`.
pub fn parent_path(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or(REPO_ROOT)
}
