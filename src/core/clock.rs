//! Clock Controller.
//!
//! Advances every sequential component by one edge. The edge runs in two
//! phases over the flattened list of sequential components:
//!
//! 1. **Capture**: each component computes its next state from the values of
//!    the last propagation pass. Nothing has changed since that pass, so all
//!    components see the same pre-edge snapshot.
//! 2. **Commit**: every component replaces its current state with the
//!    captured next state.
//!
//! Commit only starts once every capture is done, so no component can observe
//! another component's post-edge state while computing its own next state.
//! The design re-propagates after the commit.

use super::component::{Component, ComponentId};
use super::port::Port;

/// Lifecycle state of the clock controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    /// `verify_and_initialize` has not succeeded yet.
    Uninitialized,
    /// All ports reflect the current state; external reads are consistent.
    Idle,
    /// A propagation pass is running.
    Propagating,
    /// Sequential components are capturing and committing next state.
    Committing,
}

/// Sequential bookkeeping of a design.
#[derive(Debug)]
pub struct ClockController {
    state: ClockState,
    cycle: u64,
    sequential: Vec<ComponentId>,
}

impl ClockController {
    pub fn new() -> Self {
        Self {
            state: ClockState::Uninitialized,
            cycle: 0,
            sequential: Vec::new(),
        }
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Number of clock edges since initialization or the last reset.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Sequential components in design order.
    pub fn sequential(&self) -> &[ComponentId] {
        &self.sequential
    }

    pub(crate) fn set_sequential(&mut self, sequential: Vec<ComponentId>) {
        self.sequential = sequential;
    }

    pub(crate) fn set_state(&mut self, state: ClockState) {
        self.state = state;
    }

    /// Captures and commits every sequential component. Returns the number
    /// of components committed.
    pub(crate) fn edge(&mut self, ports: &[Port], components: &mut [Component]) -> u64 {
        self.state = ClockState::Committing;

        for &id in &self.sequential {
            let component = &mut components[id.0];
            let inputs: Vec<u64> = component.inputs.iter().map(|p| ports[p.0].value).collect();
            component.logic.capture(&inputs);
        }

        for &id in &self.sequential {
            components[id.0].logic.commit();
        }

        self.cycle += 1;
        self.sequential.len() as u64
    }

    /// Restores every sequential component to its reset state.
    pub(crate) fn reset(&mut self, components: &mut [Component]) {
        for &id in &self.sequential {
            components[id.0].logic.reset();
        }
        self.cycle = 0;
    }
}

impl Default for ClockController {
    fn default() -> Self {
        Self::new()
    }
}
