//! Register-Transfer-Level Circuit Simulation Library.
//!
//! This crate implements a cycle-based simulation kernel for digital
//! circuits: components with fixed-width ports are wired into a signal graph
//! that may contain loops, as long as every loop passes through a sequential
//! component. Each clock edge commits all sequential state at once and then
//! re-propagates combinational values to a consistent fixpoint.
//!
//! # Architecture
//!
//! * **Kernel**: arena-backed component/port graph, lazy memoized propagation
//!   with strict-cycle detection, and a two-phase clock controller.
//! * **Memory**: sparse byte-addressable address spaces with initialization
//!   images and memory-mapped peripheral windows.
//! * **Components**: gates, adder, multiplexer, registers, register file and
//!   memories built on the kernel's `Logic` trait.
//!
//! # Modules
//!
//! * `common`: Value helpers and error types.
//! * `components`: Primitive component library.
//! * `config`: Harness configuration loading and parsing.
//! * `core`: The simulation kernel.
//! * `sim`: Harness, image loader and reference designs.
//! * `soc`: Address spaces and peripherals.
//! * `stats`: Simulation statistics.

/// Shared value helpers and error types.
///
/// Provides width masking used by every port and the error enums returned
/// by construction, lifecycle and loading operations.
pub mod common;

/// Primitive component library.
pub mod components;

/// Configuration system for the simulator binary.
///
/// Loads and parses TOML configuration files selecting a reference design,
/// its parameters and the memory map of its peripherals.
pub mod config;

/// Simulation kernel: ports, components, the design graph, propagation and
/// clocking.
pub mod core;

/// Simulation harness, binary loaders and reference designs.
pub mod sim;

/// Address-space subsystem and memory-mapped peripherals.
///
/// Implements sparse memories, initialization images and I/O window
/// forwarding used by memory components.
pub mod soc;

/// Simulation statistics collection and reporting.
pub mod stats;
