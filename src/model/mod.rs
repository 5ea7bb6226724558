//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `Catalog` - Immutable operator/branch/class/guide tables
//! - `FilterState` - Operator list filter selections
//! - `DpsCalculator` - DPS comparison roster and derived metrics
//! - `ModalStack` - Modal overlay management

pub mod catalog;
pub mod dps;
pub mod filter;
pub mod fragment;
pub mod modal;
pub mod operator;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use catalog::Catalog;
pub use dps::{AddOutcome, DpsCalculator, OperatorParameters};
pub use filter::FilterState;
pub use operator::{Branch, ClassInfo, Operator, OperatorId, Profession, SubProfessionId};
