//! Portable representation of registry state, and the interchange document
//! written by export and read by import.

pub mod auth_descriptor;
pub mod device_snapshot;
pub mod module_snapshot;
pub mod snapshot_document;
pub mod twin_snapshot;
