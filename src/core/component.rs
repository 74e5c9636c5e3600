//! Components and Component Behaviour.
//!
//! A component owns its input and output ports and may own child
//! components. Its behaviour is supplied by a [`Logic`] implementation: a
//! combinational rule computing outputs from inputs and, for sequential
//! components, a next-state rule that is captured before a clock edge and
//! committed on it.
//!
//! The containment tree (parent/children) is independent of the signal
//! graph, which lives in the design's netlist and may contain cycles.

use super::port::{InputDecl, OutputDecl, PortId};
use crate::soc::SharedAddressSpace;

/// Stable index of a component inside a [`Design`](super::Design).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) usize);

impl ComponentId {
    /// Raw arena index of the component.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Classification used by the clock controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Class {
    /// Outputs are a pure function of the inputs.
    Combinational,
    /// Holds state updated only on clock edges.
    Sequential,
}

/// Behaviour of a component.
///
/// Port declarations are read once when the component is added to a design;
/// the order of the returned declarations fixes the slot indices passed to
/// [`Logic::evaluate`] and [`Logic::state`].
pub trait Logic {
    /// Short name of the component type, used in traces.
    fn type_name(&self) -> &'static str;

    /// Declares the input ports.
    fn inputs(&self) -> Vec<InputDecl>;

    /// Declares the output ports.
    fn outputs(&self) -> Vec<OutputDecl>;

    fn class(&self) -> Class {
        Class::Combinational
    }

    /// Computes combinational output `output` from the input values.
    ///
    /// `inputs` holds one value per declared input. Only the inputs the
    /// output depends on are guaranteed to be resolved in the current pass.
    /// Outputs driven by state are never evaluated through this method.
    fn evaluate(&mut self, _output: usize, _inputs: &[u64]) -> u64 {
        0
    }

    /// Current-state value for a state-driven output.
    fn state(&self, _output: usize) -> u64 {
        0
    }

    /// Computes the next state from the fully propagated pre-edge inputs.
    fn capture(&mut self, _inputs: &[u64]) {}

    /// Commits the captured next state (the clock edge).
    fn commit(&mut self) {}

    /// Restores the declared reset state.
    fn reset(&mut self) {}

    /// Address space backing this component, if it is a memory.
    fn address_space(&self) -> Option<SharedAddressSpace> {
        None
    }
}

/// A node of the component tree.
pub struct Component {
    pub(crate) name: String,
    pub(crate) path: String,
    pub(crate) parent: Option<ComponentId>,
    pub(crate) children: Vec<ComponentId>,
    pub(crate) inputs: Vec<PortId>,
    pub(crate) outputs: Vec<PortId>,
    pub(crate) class: Class,
    pub(crate) logic: Box<dyn Logic>,
}

impl Component {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dot-separated path from the top of the tree (`cpu.alu`).
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    /// Input ports in declaration order.
    pub fn inputs(&self) -> &[PortId] {
        &self.inputs
    }

    /// Output ports in declaration order.
    pub fn outputs(&self) -> &[PortId] {
        &self.outputs
    }

    pub fn class(&self) -> Class {
        self.class
    }

    pub fn is_sequential(&self) -> bool {
        self.class == Class::Sequential
    }

    pub fn type_name(&self) -> &'static str {
        self.logic.type_name()
    }

    pub fn logic(&self) -> &dyn Logic {
        self.logic.as_ref()
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("path", &self.path)
            .field("type", &self.logic.type_name())
            .field("class", &self.class)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .finish()
    }
}
