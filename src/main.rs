use clap::Parser;
use mirrorcp::commands;
use mirrorcp::commands::BackupChoice;
use mirrorcp::config::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List => commands::list(&cli.config),
        Command::Init { force } => commands::init(&cli.config, force),
        Command::Run {
            name,
            backup,
            no_backup,
            yes,
        } => {
            let choice = if backup {
                BackupChoice::Always
            } else if no_backup {
                BackupChoice::Never
            } else {
                BackupChoice::Ask
            };
            commands::run(&cli.config, &name, choice, yes)
        }
    }
}
