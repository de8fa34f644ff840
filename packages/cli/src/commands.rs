//! Command execution.
//!
//! Every storage command loads the saved properties into fresh settings,
//! builds a transfer manager from them and runs one operation.

use std::io::Write;

use tracing::info;

use hubic_plugin::{authorization_url, new_state};
use hubic_transfer::{
    PropertyDescriptor, PropertyLoader, PropertySaver, PropertyVisitor, RemoteFile,
    StorageError, TransferManager, TransferSettings,
};

use crate::cli::Command;
use crate::config::ConfigFile;
use crate::error::CliError;

/// Answers the access token prompt and nothing else.
struct AccessTokenAnswer<'a>(&'a str);

impl PropertyVisitor for AccessTokenAnswer<'_> {
    fn string_property(
        &mut self,
        property: &PropertyDescriptor,
        _current: Option<&str>,
    ) -> Option<String> {
        if property.prompted {
            Some(self.0.to_string())
        } else {
            None
        }
    }
}

fn connect(
    settings: &mut dyn TransferSettings,
    config: &ConfigFile,
) -> Result<Box<dyn TransferManager>, CliError> {
    let values = config.load()?;
    settings.visit_properties(&mut PropertyLoader::new(&values))?;

    let manager = settings.create_transfer_manager().map_err(|e| match e {
        StorageError::MissingCredentials => CliError::NotLoggedIn,
        e => CliError::Storage(e),
    })?;
    manager.connect()?;
    Ok(manager)
}

/// Run `command` with `settings` as the starting point, writing results to `out`.
pub fn run(
    command: Command,
    mut settings: Box<dyn TransferSettings>,
    config: &ConfigFile,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::AuthUrl => {
            writeln!(out, "{}", authorization_url(&new_state()))?;
            return Ok(());
        }
        Command::Login { ref access_token } => {
            settings.visit_properties(&mut AccessTokenAnswer(access_token))?;

            let mut saver = PropertySaver::new();
            settings.visit_properties(&mut saver)?;
            config.save(&saver.into_values())?;

            info!(path = %config.path().display(), "credentials saved");
            writeln!(out, "Credentials saved to {}", config.path().display())?;
            return Ok(());
        }
        _ => {}
    }

    let manager = connect(settings.as_mut(), config)?;

    match command {
        Command::Init { create } => {
            manager.init(create, &RemoteFile::syncany())?;
            writeln!(out, "Repository folders initialized")?;
        }
        Command::Ls { kind } => {
            let mut files: Vec<_> = manager.list(kind, &kind)?.into_iter().collect();
            files.sort();
            for file in files {
                writeln!(out, "{}", file.name())?;
            }
        }
        Command::Upload { local, kind, name } => {
            let remote = kind.file(name);
            manager.upload(&local, &remote)?;
            writeln!(out, "Uploaded {} to {}", local.display(), remote)?;
        }
        Command::Download { kind, name, local } => {
            let remote = kind.file(name);
            manager.download(&remote, &local)?;
            writeln!(out, "Downloaded {} to {}", remote, local.display())?;
        }
        Command::Mv {
            kind,
            name,
            to_kind,
            to_name,
        } => {
            let source = kind.file(name);
            let target = to_kind.file(to_name);
            manager.move_file(&source, &target)?;
            writeln!(out, "Moved {} to {}", source, target)?;
        }
        Command::Rm { kind, name } => {
            let remote = kind.file(name);
            if !manager.delete(&remote)? {
                return Err(CliError::DeleteRefused(remote));
            }
            writeln!(out, "Deleted {}", remote)?;
        }
        Command::Check => {
            writeln!(out, "target exists: {}", manager.test_target_exists()?)?;
            writeln!(out, "target writable: {}", manager.test_target_can_write()?)?;
            writeln!(out, "target creatable: {}", manager.test_target_can_create()?)?;
            writeln!(
                out,
                "repository exists: {}",
                manager.test_repo_file_exists(&RemoteFile::syncany())?
            )?;
        }
        Command::AuthUrl | Command::Login { .. } => {}
    }

    manager.disconnect()?;
    Ok(())
}
