pub(crate) mod client;
pub(crate) mod error;

pub use client::{ClientSettings, HttpRegistryClient};
pub use error::{ClientError, Result};
