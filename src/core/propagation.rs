//! Propagation Engine.
//!
//! Resolves every port value for the current sequential state. Resolution is
//! lazy and memoized: a port resolves its dependencies first, then computes
//! its own value, so the visiting order of the roots does not matter. The
//! depth-first walk runs on an explicit stack with a three-state marker per
//! port, so deep circuits cannot exhaust the call stack. Reaching a port
//! that is still `Resolving` means the walk has come back around a loop with
//! no state-driven output in it: a strict cycle.

use super::component::Component;
use super::netlist::Netlist;
use super::port::{Direction, Drive, Port, PortId, Resolution};
use crate::common::ConfigError;

enum Frame {
    /// Resolve the dependencies of the port, then come back to it.
    Enter(PortId),
    /// All dependencies resolved; compute the value.
    Exit(PortId),
}

/// One propagation pass over a design's arenas.
pub(crate) struct Resolver<'a> {
    ports: &'a mut [Port],
    components: &'a mut [Component],
    netlist: &'a Netlist,
    resolved: u64,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(
        ports: &'a mut [Port],
        components: &'a mut [Component],
        netlist: &'a Netlist,
    ) -> Self {
        Self {
            ports,
            components,
            netlist,
            resolved: 0,
        }
    }

    /// Runs a full pass and returns the number of ports resolved.
    ///
    /// Sequential current state is left untouched; only the per-port
    /// resolution markers are cleared.
    pub(crate) fn run(mut self) -> Result<u64, ConfigError> {
        for port in self.ports.iter_mut() {
            port.resolution = Resolution::Unresolved;
        }
        for idx in 0..self.ports.len() {
            self.resolve(PortId(idx))?;
        }
        Ok(self.resolved)
    }

    /// Resolves `root` and everything it depends on.
    pub(crate) fn resolve(&mut self, root: PortId) -> Result<(), ConfigError> {
        let mut stack = vec![Frame::Enter(root)];

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(port) => match self.ports[port.0].resolution {
                    Resolution::Resolved => {}
                    Resolution::Resolving => return Err(self.cycle_error(port, &stack)),
                    Resolution::Unresolved => {
                        self.ports[port.0].resolution = Resolution::Resolving;
                        stack.push(Frame::Exit(port));
                        self.push_dependencies(port, &mut stack);
                    }
                },
                Frame::Exit(port) => {
                    let value = self.compute(port);
                    self.ports[port.0].set_resolved(value);
                    self.resolved += 1;
                }
            }
        }
        Ok(())
    }

    fn push_dependencies(&self, port: PortId, stack: &mut Vec<Frame>) {
        let p = &self.ports[port.0];
        match (p.direction, p.drive.as_ref()) {
            (Direction::Input, _) => {
                if let Some(driver) = self.netlist.driver(port) {
                    stack.push(Frame::Enter(driver));
                }
            }
            (Direction::Output, Some(Drive::Comb)) => {
                let owner = &self.components[p.owner.0];
                stack.extend(owner.inputs.iter().rev().map(|&i| Frame::Enter(i)));
            }
            (Direction::Output, Some(Drive::CombOn(deps))) => {
                let owner = &self.components[p.owner.0];
                stack.extend(deps.iter().rev().map(|&d| Frame::Enter(owner.inputs[d])));
            }
            (Direction::Output, Some(Drive::State)) | (Direction::Output, None) => {}
        }
    }

    fn compute(&mut self, port: PortId) -> u64 {
        let p = &self.ports[port.0];
        match (p.direction, p.drive.as_ref()) {
            // Unconnected inputs read as zero; verification rejects them
            // before the first clock.
            (Direction::Input, _) => self
                .netlist
                .driver(port)
                .map(|driver| self.ports[driver.0].value)
                .unwrap_or(0),
            (Direction::Output, Some(Drive::State)) => {
                self.components[p.owner.0].logic.state(p.slot)
            }
            (Direction::Output, Some(_)) => {
                let slot = p.slot;
                let owner = &mut self.components[p.owner.0];
                let inputs: Vec<u64> = owner
                    .inputs
                    .iter()
                    .map(|i| self.ports[i.0].value)
                    .collect();
                owner.logic.evaluate(slot, &inputs)
            }
            (Direction::Output, None) => 0,
        }
    }

    /// Builds the component path of the loop closed by re-entering `port`.
    fn cycle_error(&self, port: PortId, stack: &[Frame]) -> ConfigError {
        let active: Vec<PortId> = stack
            .iter()
            .filter_map(|frame| match frame {
                Frame::Exit(p) => Some(*p),
                Frame::Enter(_) => None,
            })
            .collect();
        let start = active.iter().position(|&p| p == port).unwrap_or(0);

        let mut path: Vec<String> = Vec::new();
        for p in &active[start..] {
            let name = &self.components[self.ports[p.0].owner.0].path;
            if path.last() != Some(name) {
                path.push(name.clone());
            }
        }
        // Close the loop unless the walk already came back to its first component.
        if path.len() == 1 || path.first() != path.last() {
            if let Some(first) = path.first().cloned() {
                path.push(first);
            }
        }
        ConfigError::StrictCycle(path)
    }
}
