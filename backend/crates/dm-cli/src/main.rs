//! hub-migrate - copy devices between device registries
//!
//! # Examples
//!
//! ```bash
//! # Interactive menu
//! hub-migrate
//!
//! # Export the source registry
//! hub-migrate export --output export.json --connection-string "HostName=...;SharedAccessKey=..."
//!
//! # Import every enabled device whose id starts with "plant-"
//! hub-migrate import --file export.json --prefix plant- --status enabled --yes
//! ```

use dm_cli::document_file::read_document;
use dm_cli::logger;
use dm_cli::menu::run_menu;
use dm_cli::runner::{
    connect, export_summary, import_summary, run_export, run_import, select_by_criteria,
};
use dm_cli::{Cli, CliError, CliResult, Commands, ExportArgs, ImportArgs, Prompt};

use dm_config::{Config, LogLevel};

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<ExitCode> {
    let mut config = Config::load()?;
    if let Some(level) = &cli.log_level {
        config.logging.level = LogLevel::parse_or_default(level);
    }
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting hub-migrate v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    match cli.command() {
        Commands::Interactive => {
            let stdin = std::io::stdin();
            let mut prompt = Prompt::new(stdin.lock(), std::io::stdout());
            run_menu(&mut prompt, &config, |cs| connect(cs, &config.registry)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Export(args) => export_command(&config, args).await,
        Commands::Import(args) => import_command(&config, args).await,
    }
}

async fn export_command(config: &Config, args: ExportArgs) -> CliResult<ExitCode> {
    let connection_string = args
        .connection_string
        .or_else(|| config.registry.source_connection_string.clone())
        .unwrap_or_default();
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.export.default_file));
    let limit = args.limit.unwrap_or(config.export.device_limit);

    let registry = connect(&connection_string, &config.registry)?;
    let report = run_export(&registry, &output, limit).await?;

    for line in export_summary(&report, &output) {
        println!("{}", line);
    }

    if report.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

async fn import_command(config: &Config, args: ImportArgs) -> CliResult<ExitCode> {
    let criteria = args.criteria();
    let file = args
        .file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export.default_file));
    let connection_string = args
        .connection_string
        .clone()
        .or_else(|| config.registry.destination_connection_string.clone())
        .unwrap_or_default();
    if connection_string.trim().is_empty() {
        return Err(CliError::input("Connection string cannot be empty."));
    }

    let document = read_document(&file)?;
    if document.devices.is_empty() {
        return Err(CliError::input("No devices found in the export file."));
    }
    println!("Found {} devices in the export file.", document.devices.len());

    if criteria.is_empty() {
        return Err(CliError::input(
            "No devices selected for import. Use --all, --prefix, --status or --ids.",
        ));
    }
    let selection = select_by_criteria(&document.devices, &criteria);
    if selection.is_empty() {
        return Err(CliError::input("No devices selected for import."));
    }
    println!("Selected {} devices for import.", selection.len());

    if !(args.yes || config.import.assume_yes) {
        let stdin = std::io::stdin();
        let mut prompt = Prompt::new(stdin.lock(), std::io::stdout());
        if !prompt.confirm("Proceed with import? (y/n): ")? {
            println!("Import canceled.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let registry = connect(&connection_string, &config.registry)?;
    let policy = args
        .twin_concurrency
        .unwrap_or(config.import.twin_concurrency);
    let report = run_import(&registry, selection.devices(), policy).await;

    for line in import_summary(&report) {
        println!("{}", line);
    }

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
