use serde::Serialize;

/// Per-kind import tally.
///
/// `succeeded + failed` is the number of entities attempted; `created` and
/// `skipped` break down the existence check and can be non-zero for an entity
/// that later failed on its twin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntityImportCounts {
    pub succeeded: usize,
    pub failed: usize,
    pub created: usize,
    pub skipped: usize,
}

impl EntityImportCounts {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}
