use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hubic_transfer::RemoteFileType;

/// hubic - Manage a repository stored on Hubic
#[derive(Parser, Debug)]
#[command(name = "hubic")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: $HUBIC_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the page where an access token can be obtained
    AuthUrl,

    /// Exchange an access token for storage credentials and save them
    Login { access_token: String },

    /// Create the repository folders
    Init {
        /// Also create the repository root if the repository does not exist
        #[arg(long)]
        create: bool,
    },

    /// List the files of one kind
    Ls { kind: RemoteFileType },

    Upload {
        local: PathBuf,
        kind: RemoteFileType,
        name: String,
    },

    Download {
        kind: RemoteFileType,
        name: String,
        local: PathBuf,
    },

    /// Move a remote file (copy, then delete the source)
    Mv {
        kind: RemoteFileType,
        name: String,
        to_kind: RemoteFileType,
        to_name: String,
    },

    Rm { kind: RemoteFileType, name: String },

    /// Probe the storage target
    Check,
}
