//! Domain types and pure logic for the AR aging tool.
//!
//! Everything in this crate is side-effect free: invoice models, the aging
//! bucket rules, age/overdue calculations, display formatting and the CLI
//! settings struct. File I/O lives in `aging-data`.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
