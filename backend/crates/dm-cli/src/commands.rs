use dm_config::{MAX_DEVICE_LIMIT, MIN_DEVICE_LIMIT, TwinConcurrencyPolicy};
use dm_core::SelectCriterion;

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Subcommand};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Walk through export and import with prompts
    Interactive,

    /// Write every device of the source registry to a snapshot file
    Export(ExportArgs),

    /// Create the selected devices of a snapshot file in the destination registry
    Import(ImportArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    /// Output file (default: export.default_file from config.toml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Source registry connection string (default: registry.source_connection_string)
    #[arg(long)]
    pub connection_string: Option<String>,

    /// Maximum number of devices to read, 1-1000 (default: export.device_limit)
    #[arg(long, value_parser = device_limit_parser())]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ImportArgs {
    /// Snapshot file to read (default: export.default_file from config.toml)
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Destination registry connection string (default: registry.destination_connection_string)
    #[arg(long)]
    pub connection_string: Option<String>,

    /// Select every device in the file
    #[arg(long)]
    pub all: bool,

    /// Select devices whose id starts with this prefix (case-insensitive, repeatable)
    #[arg(long)]
    pub prefix: Vec<String>,

    /// Select devices with this status: enabled or disabled (repeatable)
    #[arg(long)]
    pub status: Vec<String>,

    /// Select devices by id (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Import without asking for confirmation
    #[arg(long, short)]
    pub yes: bool,

    /// Twin update guard: unconditional or match_destination
    #[arg(long, value_parser = parse_twin_concurrency)]
    pub twin_concurrency: Option<TwinConcurrencyPolicy>,
}

impl ImportArgs {
    /// Selection criteria in the order they are applied: all, prefixes,
    /// statuses, then explicit ids.
    pub fn criteria(&self) -> Vec<SelectCriterion> {
        let mut criteria = Vec::new();

        if self.all {
            criteria.push(SelectCriterion::All);
        }
        criteria.extend(self.prefix.iter().cloned().map(SelectCriterion::PrefixMatch));
        criteria.extend(self.status.iter().cloned().map(SelectCriterion::StatusMatch));
        if !self.ids.is_empty() {
            criteria.push(SelectCriterion::ExplicitIds(self.ids.clone()));
        }

        criteria
    }
}

fn device_limit_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(MIN_DEVICE_LIMIT as u64..=MAX_DEVICE_LIMIT as u64)
}

fn parse_twin_concurrency(value: &str) -> Result<TwinConcurrencyPolicy, String> {
    value.parse().map_err(|_| {
        format!(
            "invalid twin concurrency '{}' (expected unconditional or match_destination)",
            value
        )
    })
}
