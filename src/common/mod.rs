//! Common utilities and types used throughout the circuit simulator.
//!
//! This module provides the value helpers shared by ports and components
//! and the error types reported by the kernel and the address-space
//! subsystem.

/// Error types for circuit construction, lifecycle misuse and loading.
pub mod error;

/// Bit-vector value helpers (width masks and limits).
pub mod value;

pub use error::{ConfigError, Result, RuntimeError, SimError};
pub use value::{mask, width_for, MAX_WIDTH};
