//! Simulation harness: image loading, reference designs and tracing.

/// Binary image loading into initialization memories.
pub mod loader;

/// Reference circuits built from the primitive component library.
pub mod designs;

/// Per-cycle snapshots of port values.
pub mod trace;

pub use designs::Bench;
pub use trace::Snapshot;
