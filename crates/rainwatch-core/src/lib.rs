//! Core data types and classification logic for rain-gauge readings
//!
//! This crate provides the pure, I/O-free parts of the rainfall dashboard:
//! the wire data model, severity classification, search filtering,
//! highlight markup, and timestamp formatting.

pub mod search;
pub mod severity;
pub mod timefmt;
pub mod types;

pub use search::*;
pub use severity::*;
pub use timefmt::*;
pub use types::*;
