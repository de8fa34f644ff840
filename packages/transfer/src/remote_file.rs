//! Remote file descriptors.
//!
//! A remote file is a bare name plus the kind of file it is. The kind decides
//! which top-level folder of the repository the file lives in.

use std::fmt;
use std::str::FromStr;

use crate::error::StorageError;

/// The kinds of files a repository holds.
///
/// All kinds except [`RemoteFileType::Syncany`] and [`RemoteFileType::Master`]
/// live in a fixed folder. Those two sit at the repository root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RemoteFileType {
    Multichunk,
    Database,
    /// Cleanup files share the database folder.
    Cleanup,
    Action,
    Transaction,
    Temp,
    /// The repository marker file.
    Syncany,
    /// The repository master key file.
    Master,
}

impl RemoteFileType {
    pub const ALL: [RemoteFileType; 8] = [
        RemoteFileType::Multichunk,
        RemoteFileType::Database,
        RemoteFileType::Cleanup,
        RemoteFileType::Action,
        RemoteFileType::Transaction,
        RemoteFileType::Temp,
        RemoteFileType::Syncany,
        RemoteFileType::Master,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteFileType::Multichunk => "multichunk",
            RemoteFileType::Database => "database",
            RemoteFileType::Cleanup => "cleanup",
            RemoteFileType::Action => "action",
            RemoteFileType::Transaction => "transaction",
            RemoteFileType::Temp => "temp",
            RemoteFileType::Syncany => "syncany",
            RemoteFileType::Master => "master",
        }
    }

    /// A remote file of this kind.
    pub fn file(self, name: impl Into<String>) -> RemoteFile {
        RemoteFile::new(name, self)
    }
}

impl fmt::Display for RemoteFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemoteFileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "multichunk" | "multichunks" => Ok(RemoteFileType::Multichunk),
            "database" | "databases" => Ok(RemoteFileType::Database),
            "cleanup" => Ok(RemoteFileType::Cleanup),
            "action" | "actions" => Ok(RemoteFileType::Action),
            "transaction" | "transactions" => Ok(RemoteFileType::Transaction),
            "temp" | "temporary" => Ok(RemoteFileType::Temp),
            "syncany" => Ok(RemoteFileType::Syncany),
            "master" => Ok(RemoteFileType::Master),
            _ => Err(format!("Unknown remote file type: {}", s)),
        }
    }
}

/// A file in the remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteFile {
    name: String,
    kind: RemoteFileType,
}

impl RemoteFile {
    pub fn new(name: impl Into<String>, kind: RemoteFileType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// The repository marker, `syncany`, at the repository root.
    pub fn syncany() -> Self {
        Self::new("syncany", RemoteFileType::Syncany)
    }

    /// File name without any folder prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RemoteFileType {
        self.kind
    }
}

impl fmt::Display for RemoteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Builds typed remote files from the bare names found in a listing.
pub trait RemoteFileFactory {
    fn create_remote_file(&self, name: &str) -> Result<RemoteFile, StorageError>;
}

impl RemoteFileFactory for RemoteFileType {
    fn create_remote_file(&self, name: &str) -> Result<RemoteFile, StorageError> {
        if name.is_empty() || name.contains('/') {
            return Err(StorageError::Other {
                message: format!("invalid {} file name: {:?}", self, name),
            });
        }
        Ok(RemoteFile::new(name, *self))
    }
}

impl<F> RemoteFileFactory for F
where
    F: Fn(&str) -> Result<RemoteFile, StorageError>,
{
    fn create_remote_file(&self, name: &str) -> Result<RemoteFile, StorageError> {
        self(name)
    }
}
