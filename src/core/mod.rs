//! Simulation kernel.
//!
//! Holds the component/port graph model, the propagation engine, the clock
//! controller and design verification.

/// Clock controller state machine and edge sequencing.
pub mod clock;

/// Components and the `Logic` behaviour trait.
pub mod component;

/// Design arena and lifecycle API.
pub mod design;

/// Connection edge table.
pub mod netlist;

/// Ports, drive rules and resolution markers.
pub mod port;

mod propagation;
mod verify;

pub use clock::{ClockController, ClockState};
pub use component::{Class, Component, ComponentId, Logic};
pub use design::Design;
pub use netlist::{Connection, Netlist};
pub use port::{Direction, Drive, InputDecl, OutputDecl, Port, PortId, Resolution};
