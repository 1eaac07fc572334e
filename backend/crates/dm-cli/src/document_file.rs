use crate::{CliError, CliResult};

use dm_core::SnapshotDocument;

use std::path::Path;

use log::info;

/// Read a snapshot document. A missing file is an input error rather than an
/// I/O error so the menu can say so plainly.
pub fn read_document(path: &Path) -> CliResult<SnapshotDocument> {
    if !path.is_file() {
        return Err(CliError::input(format!("File not found: {}", path.display())));
    }

    let json = std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
    let document = SnapshotDocument::from_json(&json)?;

    info!(
        "Read {} device(s) from {} (schema version {})",
        document.devices.len(),
        path.display(),
        document.schema_version
    );

    Ok(document)
}

/// Write `document` as indented JSON, replacing any existing file.
pub fn write_document(path: &Path, document: &SnapshotDocument) -> CliResult<()> {
    let json = document.to_json_pretty()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::file(parent, e))?;
    }
    std::fs::write(path, json).map_err(|e| CliError::file(path, e))?;

    info!(
        "Wrote {} device(s) to {}",
        document.devices.len(),
        path.display()
    );

    Ok(())
}
