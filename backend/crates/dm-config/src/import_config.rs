use crate::{ConfigError, ConfigErrorResult};

use std::str::FromStr;

use serde::Deserialize;

/// How twin updates on the destination are guarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwinConcurrencyPolicy {
    /// Overwrite whatever is there
    #[default]
    Unconditional,
    /// Fail the entity if the destination twin changed since it was read
    MatchDestination,
}

impl TwinConcurrencyPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconditional => "unconditional",
            Self::MatchDestination => "match_destination",
        }
    }
}

impl FromStr for TwinConcurrencyPolicy {
    type Err = ConfigError;

    /// Accepts `_` or `-` as the word separator.
    #[track_caller]
    fn from_str(s: &str) -> ConfigErrorResult<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "unconditional" => Ok(Self::Unconditional),
            "match_destination" => Ok(Self::MatchDestination),
            other => Err(ConfigError::import(format!(
                "import.twin_concurrency must be 'unconditional' or 'match_destination', got '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for TwinConcurrencyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub twin_concurrency: TwinConcurrencyPolicy,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
}
