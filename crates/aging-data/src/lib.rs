//! Data layer for the AR aging tool.
//!
//! Responsible for reading invoice rows out of spreadsheet files, enriching
//! them with derived age/bucket fields and building the report snapshot
//! consumed by the presentation shell.

pub mod aggregator;
pub mod loader;
pub mod report;

pub use aging_core as core;
