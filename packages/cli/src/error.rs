use std::path::PathBuf;

use hubic_transfer::{RemoteFile, StorageError};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("cannot access config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no config directory found, pass --config or set HUBIC_CONFIG")]
    NoConfigDir,

    #[error("not logged in, run `hubic login <ACCESS_TOKEN>` first")]
    NotLoggedIn,

    #[error("could not delete {0}")]
    DeleteRefused(RemoteFile),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
