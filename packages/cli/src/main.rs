use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hubic_cli::{resolve_path, run, Cli, CliError, ConfigFile};
use hubic_plugin::HubicTransferPlugin;
use hubic_transfer::TransferPlugin;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<(), CliError> {
    let config = ConfigFile::new(resolve_path(cli.config)?);
    let settings = HubicTransferPlugin::new().create_empty_settings();
    run(cli.command, settings, &config, &mut std::io::stdout().lock())
}
