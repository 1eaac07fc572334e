use serde::{Deserialize, Serialize};

/// Concurrency token used for twin updates on the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwinConcurrency {
    /// Wildcard token: last writer wins
    #[default]
    Unconditional,
    /// Read the destination twin's eTag and require it on update, so a write
    /// that lands in between fails the entity instead of being overwritten
    MatchDestination,
}

#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub twin_concurrency: TwinConcurrency,
}
