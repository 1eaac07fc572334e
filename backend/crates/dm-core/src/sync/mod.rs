pub mod entity_failure;
pub mod entity_import_counts;
pub mod export_report;
pub mod exporter;
pub mod import_options;
pub mod import_report;
pub mod importer;
