//! Address-space subsystem.
//!
//! Implements the sparse byte-addressable memory used by memory components,
//! its memory-mapped extension that forwards accesses to peripheral
//! handlers, and a few example peripherals.

/// Sparse memory with initialization images.
pub mod address_space;

/// Example memory-mapped peripherals.
pub mod devices;

/// Memory-mapped extension of the address space.
pub mod interconnect;

/// Address-space and peripheral interfaces.
pub mod traits;

pub use address_space::{AddressSpace, InitializationMemory};
pub use interconnect::{AddressSpaceMM, IoRegion};
pub use traits::{Addressable, IoFunctors, IoHandler, RegionType, SharedAddressSpace};
