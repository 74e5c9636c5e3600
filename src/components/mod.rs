//! Primitive component library.
//!
//! Generic building blocks implementing [`Logic`](crate::core::Logic):
//! constants, gates, arithmetic, selection, registers and memories. Circuits
//! for a particular instruction set are assembled from these, or from custom
//! `Logic` implementations, outside the kernel.

/// Adder.
pub mod adder;

/// Constant source.
pub mod constant;

/// Closure-backed combinational component.
pub mod function;

/// Multi-input logic gates and inverter.
pub mod gates;

/// Memory components backed by an address space.
pub mod memory;

/// Multiplexer.
pub mod mux;

/// Clocked register.
pub mod register;

/// Register file with two read ports and one write port.
pub mod register_file;

pub use adder::Adder;
pub use constant::Constant;
pub use function::FnComponent;
pub use gates::{GateOp, LogicGate, Not};
pub use memory::{Memory, Rom};
pub use mux::Multiplexer;
pub use register::Register;
pub use register_file::RegisterFile;
