//! Simulator Error Types.
//!
//! Configuration errors describe a malformed circuit or address map and are
//! detected while the design is being built or verified. Runtime errors
//! describe lifecycle operations invoked out of order. Neither is transient:
//! the kernel is deterministic, so there is nothing to retry.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

/// Structural problems with a circuit or an address map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An input port has no driving connection.
    #[error("input port {component}.{port} is not connected")]
    UnconnectedInput { component: String, port: String },

    /// A signal dependency cycle with no sequential component breaking it.
    ///
    /// Holds the component paths along the cycle, in dependency order.
    #[error("combinational cycle: {}", .0.join(" -> "))]
    StrictCycle(Vec<String>),

    /// A memory-mapped region would overlap an already registered one.
    #[error("I/O region {base:#010x} (+{size:#x}) overlaps an existing region")]
    OverlappingRegion { base: u32, size: u32 },

    /// No memory-mapped region is registered with this base and size.
    #[error("no I/O region registered at {base:#010x} (+{size:#x})")]
    UnknownRegion { base: u32, size: u32 },

    /// Memory-mapped regions must span at least one byte.
    #[error("I/O region at {base:#010x} has zero size")]
    EmptyRegion { base: u32 },

    /// An input port already has a driver.
    #[error("input port {component}.{port} already has a driver")]
    MultipleDrivers { component: String, port: String },

    /// Source and destination of a connection differ in width.
    #[error("cannot connect {from} ({from_width} bits) to {to} ({to_width} bits)")]
    WidthMismatch {
        from: String,
        to: String,
        from_width: u32,
        to_width: u32,
    },

    /// A connection must run from an output port to an input port.
    #[error("port {port} has the wrong direction for this connection")]
    DirectionMismatch { port: String },

    /// An output declares a dependency on an input that does not exist.
    #[error("output {component}.{port} depends on an undeclared input")]
    InvalidDependency { component: String, port: String },

    /// A component has no port with this name.
    #[error("component {component} has no port named {port}")]
    UnknownPort { component: String, port: String },

    /// A component identifier that does not belong to this design.
    #[error("no component with index {index} in this design")]
    UnknownComponent { index: usize },

    /// A port identifier that does not belong to this design.
    #[error("no port with index {index} in this design")]
    UnknownPortId { index: usize },

    /// Port widths are limited to 1..=64 bits.
    #[error("invalid port width {width}")]
    InvalidWidth { width: u32 },
}

/// Lifecycle operations invoked in the wrong state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The operation requires a verified and initialized design.
    #[error("{0} called before verify_and_initialize")]
    UninitializedAccess(&'static str),

    /// The operation is only valid while the design is being built.
    #[error("{0} called after the design was initialized")]
    AlreadyInitialized(&'static str),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// A binary image could not be read.
    #[error("could not read image '{}': {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A trace snapshot could not be serialized.
    #[error("could not serialize trace: {0}")]
    Trace(#[from] serde_json::Error),

    /// The harness configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Settings(String),
}
