//! External service interactions
//!
//! This module contains services that touch the filesystem:
//! - Data table loading
//! - CSV export of the DPS comparison

pub mod data;
pub mod export;

pub use data::{load_catalog, DataError};
pub use export::export_comparison;
