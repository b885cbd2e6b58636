//! API Module
//!
//! Boundary consumed by presentation layers (CLI, desktop or web shells).
//! Holds view shaping that does not belong in the core: top-N truncation,
//! status snapshots and error flattening.

pub mod commands;

pub use commands::*;
