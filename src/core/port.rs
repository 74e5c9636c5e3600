//! Ports and Value Resolution State.
//!
//! A port is a named, fixed-width value slot owned by a component. Input
//! ports take their value from exactly one driving output port; output ports
//! produce their value from a [`Drive`] rule declared by the owning
//! component's logic.

use super::component::ComponentId;
use crate::common::mask;

/// Stable index of a port inside a [`Design`](super::Design).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub(crate) usize);

impl PortId {
    /// Raw arena index of the port.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Direction of a port relative to its component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

/// How an output port obtains its value during a propagation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Drive {
    /// Pure function of every input port of the component.
    Comb,
    /// Pure function of the listed input ports (by declaration index).
    CombOn(Vec<usize>),
    /// Current state of a sequential component. Never depends on inputs
    /// during the same pass, which is what breaks cycles through registers.
    State,
}

/// Resolution marker used for memoization and cycle detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Unresolved,
    Resolving,
    Resolved,
}

/// Declaration of an input port, as reported by a component's logic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputDecl {
    pub name: String,
    pub width: u32,
}

impl InputDecl {
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

/// Declaration of an output port and its value rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDecl {
    pub name: String,
    pub width: u32,
    pub drive: Drive,
}

impl OutputDecl {
    /// Output computed from all inputs.
    pub fn comb(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            drive: Drive::Comb,
        }
    }

    /// Output computed from a subset of the inputs.
    pub fn comb_on(name: impl Into<String>, width: u32, inputs: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            width,
            drive: Drive::CombOn(inputs),
        }
    }

    /// Output reflecting the component's stored state.
    pub fn state(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            drive: Drive::State,
        }
    }
}

/// A typed bit-vector value holder.
#[derive(Debug)]
pub struct Port {
    pub(crate) name: String,
    pub(crate) owner: ComponentId,
    pub(crate) direction: Direction,
    /// Position among the owner's ports of the same direction.
    pub(crate) slot: usize,
    pub(crate) width: u32,
    pub(crate) drive: Option<Drive>,
    pub(crate) value: u64,
    pub(crate) resolution: Resolution,
}

impl Port {
    pub(crate) fn input(owner: ComponentId, slot: usize, decl: InputDecl) -> Self {
        Self {
            name: decl.name,
            owner,
            direction: Direction::Input,
            slot,
            width: decl.width,
            drive: None,
            value: 0,
            resolution: Resolution::Unresolved,
        }
    }

    pub(crate) fn output(owner: ComponentId, slot: usize, decl: OutputDecl) -> Self {
        Self {
            name: decl.name,
            owner,
            direction: Direction::Output,
            slot,
            width: decl.width,
            drive: Some(decl.drive),
            value: 0,
            resolution: Resolution::Unresolved,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Value rule of an output port; `None` for inputs.
    pub fn drive(&self) -> Option<&Drive> {
        self.drive.as_ref()
    }

    /// The value resolved by the most recent propagation pass.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Whether the port has been resolved in the current pass.
    pub fn is_resolved(&self) -> bool {
        self.resolution == Resolution::Resolved
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub(crate) fn set_resolved(&mut self, value: u64) {
        self.value = value & mask(self.width);
        self.resolution = Resolution::Resolved;
    }
}
