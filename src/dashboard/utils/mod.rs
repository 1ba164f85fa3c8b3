//! Utility modules for dashboard generation.

pub mod classify;

pub use classify::*;
