//! Loading configurations and exporting chain histories.

pub mod json;

#[cfg(feature = "csv")]
pub mod csv;
