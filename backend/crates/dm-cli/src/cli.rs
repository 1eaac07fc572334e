use crate::commands::Commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "hub-migrate")]
#[command(about = "Copy devices, twins and modules between device registries")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override logging.level from config.toml (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Interactive)
    }
}
