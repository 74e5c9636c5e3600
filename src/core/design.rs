//! Design (Graph Root).
//!
//! The `Design` owns every component and port of a circuit in flat arenas
//! addressed by [`ComponentId`] and [`PortId`], plus the netlist connecting
//! them. It exposes the construction API, the lifecycle API
//! (`verify_and_initialize`, `clock`, `reset`) and read-only inspection.
//!
//! # Lifecycle
//!
//! A design is built with [`Design::add_component`] and [`Design::connect`],
//! verified once with [`Design::verify_and_initialize`], and then clocked or
//! reset any number of times. Construction calls are rejected after
//! initialization; lifecycle calls are rejected before it. Port values may
//! be read at any time.

use std::rc::Rc;

use super::clock::{ClockController, ClockState};
use super::component::{Class, Component, ComponentId, Logic};
use super::netlist::Netlist;
use super::port::{Direction, Drive, Port, PortId};
use super::propagation::Resolver;
use super::verify;
use crate::common::{ConfigError, Result, RuntimeError, MAX_WIDTH};
use crate::soc::SharedAddressSpace;
use crate::stats::SimStats;

/// A complete circuit and its simulation state.
pub struct Design {
    name: String,
    components: Vec<Component>,
    ports: Vec<Port>,
    netlist: Netlist,
    clock: ClockController,
    address_spaces: Vec<SharedAddressSpace>,
    stats: SimStats,
}

impl Design {
    /// Creates an empty design.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            ports: Vec::new(),
            netlist: Netlist::new(),
            clock: ClockController::new(),
            address_spaces: Vec::new(),
            stats: SimStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a top-level component.
    ///
    /// # Errors
    ///
    /// `InvalidWidth` if a declared port is 0 or wider than 64 bits,
    /// `InvalidDependency` if an output depends on an undeclared input, and
    /// `AlreadyInitialized` once the design has been initialized.
    pub fn add_component<L: Logic + 'static>(
        &mut self,
        name: impl Into<String>,
        logic: L,
    ) -> Result<ComponentId> {
        self.insert(None, name.into(), Box::new(logic))
    }

    /// Adds a component as a child of `parent`.
    ///
    /// # Errors
    ///
    /// `UnknownComponent` if `parent` was not issued by this design, plus
    /// the errors of [`Design::add_component`].
    pub fn add_child<L: Logic + 'static>(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
        logic: L,
    ) -> Result<ComponentId> {
        self.insert(Some(parent), name.into(), Box::new(logic))
    }

    /// Adds an already boxed component, optionally under a parent.
    pub fn add_boxed(
        &mut self,
        parent: Option<ComponentId>,
        name: impl Into<String>,
        logic: Box<dyn Logic>,
    ) -> Result<ComponentId> {
        self.insert(parent, name.into(), logic)
    }

    fn insert(
        &mut self,
        parent: Option<ComponentId>,
        name: String,
        logic: Box<dyn Logic>,
    ) -> Result<ComponentId> {
        self.ensure_building("add_component")?;
        if let Some(p) = parent {
            self.check_component(p)?;
        }

        let inputs = logic.inputs();
        let outputs = logic.outputs();

        for width in inputs.iter().map(|d| d.width).chain(outputs.iter().map(|d| d.width)) {
            if width == 0 || width > MAX_WIDTH {
                return Err(ConfigError::InvalidWidth { width }.into());
            }
        }

        let path = match parent {
            Some(p) => format!("{}.{}", self.components[p.0].path, name),
            None => name.clone(),
        };

        for decl in &outputs {
            if let Drive::CombOn(deps) = &decl.drive {
                if deps.iter().any(|&d| d >= inputs.len()) {
                    return Err(ConfigError::InvalidDependency {
                        component: path,
                        port: decl.name.clone(),
                    }
                    .into());
                }
            }
        }

        let id = ComponentId(self.components.len());
        let mut input_ids = Vec::with_capacity(inputs.len());
        for (slot, decl) in inputs.into_iter().enumerate() {
            input_ids.push(self.alloc_port(Port::input(id, slot, decl)));
        }
        let mut output_ids = Vec::with_capacity(outputs.len());
        for (slot, decl) in outputs.into_iter().enumerate() {
            output_ids.push(self.alloc_port(Port::output(id, slot, decl)));
        }

        let class = logic.class();
        self.components.push(Component {
            name,
            path,
            parent,
            children: Vec::new(),
            inputs: input_ids,
            outputs: output_ids,
            class,
            logic,
        });
        if let Some(p) = parent {
            self.components[p.0].children.push(id);
        }
        Ok(id)
    }

    fn alloc_port(&mut self, port: Port) -> PortId {
        let id = PortId(self.ports.len());
        self.ports.push(port);
        self.netlist.add_port();
        id
    }

    /// Connects an output port to an input port.
    ///
    /// # Errors
    ///
    /// `DirectionMismatch` unless `source` is an output and `dest` an input,
    /// `WidthMismatch` if their widths differ, `MultipleDrivers` if `dest`
    /// is already driven, `UnknownPortId` if either port was not issued by
    /// this design.
    pub fn connect(&mut self, source: PortId, dest: PortId) -> Result<()> {
        self.ensure_building("connect")?;
        self.check_port(source)?;
        self.check_port(dest)?;

        let src = &self.ports[source.0];
        let dst = &self.ports[dest.0];
        if src.direction != Direction::Output {
            return Err(ConfigError::DirectionMismatch {
                port: self.port_path(source),
            }
            .into());
        }
        if dst.direction != Direction::Input {
            return Err(ConfigError::DirectionMismatch {
                port: self.port_path(dest),
            }
            .into());
        }
        if src.width != dst.width {
            return Err(ConfigError::WidthMismatch {
                from: self.port_path(source),
                to: self.port_path(dest),
                from_width: src.width,
                to_width: dst.width,
            }
            .into());
        }
        if self.netlist.driver(dest).is_some() {
            return Err(ConfigError::MultipleDrivers {
                component: self.components[dst.owner.0].path.clone(),
                port: dst.name.clone(),
            }
            .into());
        }

        self.netlist.connect(source, dest);
        Ok(())
    }

    /// Connects output `output` of `source` to input `input` of `dest`.
    ///
    /// # Errors
    ///
    /// `UnknownComponent` for a foreign component, `UnknownPort` if either
    /// component lacks the named port, plus the errors of
    /// [`Design::connect`].
    pub fn wire(
        &mut self,
        source: ComponentId,
        output: &str,
        dest: ComponentId,
        input: &str,
    ) -> Result<()> {
        self.check_component(source)?;
        self.check_component(dest)?;
        let from = self
            .output(source, output)
            .ok_or_else(|| self.unknown_port(source, output))?;
        let to = self
            .input(dest, input)
            .ok_or_else(|| self.unknown_port(dest, input))?;
        self.connect(from, to)
    }

    fn unknown_port(&self, component: ComponentId, port: &str) -> ConfigError {
        ConfigError::UnknownPort {
            component: self.components[component.0].path.clone(),
            port: port.to_string(),
        }
    }

    fn check_component(&self, id: ComponentId) -> Result<()> {
        if id.0 < self.components.len() {
            Ok(())
        } else {
            Err(ConfigError::UnknownComponent { index: id.0 }.into())
        }
    }

    fn check_port(&self, id: PortId) -> Result<()> {
        if id.0 < self.ports.len() {
            Ok(())
        } else {
            Err(ConfigError::UnknownPortId { index: id.0 }.into())
        }
    }

    /// Connects one output port to several input ports.
    pub fn connect_all(&mut self, source: PortId, dests: &[PortId]) -> Result<()> {
        for &dest in dests {
            self.connect(source, dest)?;
        }
        Ok(())
    }

    /// Registers an address space that `reset` must reload.
    ///
    /// Spaces exposed by memory components are collected automatically
    /// during verification; this is for spaces shared with components that
    /// reach them some other way.
    pub fn register_address_space(&mut self, space: SharedAddressSpace) -> Result<()> {
        self.ensure_building("register_address_space")?;
        self.track_space(space);
        Ok(())
    }

    fn track_space(&mut self, space: SharedAddressSpace) {
        let addr = Rc::as_ptr(&space) as *const u8;
        if !self
            .address_spaces
            .iter()
            .any(|s| Rc::as_ptr(s) as *const u8 == addr)
        {
            self.address_spaces.push(space);
        }
    }

    /// Validates the design and runs the first propagation pass.
    ///
    /// On failure the design stays uninitialized and may be fixed and
    /// verified again.
    ///
    /// # Errors
    ///
    /// `UnconnectedInput` for an input port with no driver, `StrictCycle`
    /// for a combinational loop, `AlreadyInitialized` if called again after
    /// success.
    pub fn verify_and_initialize(&mut self) -> Result<()> {
        self.ensure_building("verify_and_initialize")?;

        verify::check_inputs_connected(&self.components, &self.ports, &self.netlist)?;

        let sequential: Vec<ComponentId> = self
            .components
            .iter()
            .enumerate()
            .filter(|(_, c)| c.class == Class::Sequential)
            .map(|(i, _)| ComponentId(i))
            .collect();

        let spaces: Vec<SharedAddressSpace> = self
            .components
            .iter()
            .filter_map(|c| c.logic.address_space())
            .collect();
        for space in spaces {
            self.track_space(space);
        }

        tracing::debug!(
            design = %self.name,
            components = self.components.len(),
            ports = self.ports.len(),
            connections = self.netlist.len(),
            sequential = sequential.len(),
            address_spaces = self.address_spaces.len(),
            "verifying design"
        );

        self.clock.set_sequential(sequential);
        self.clock.set_state(ClockState::Propagating);
        if let Err(e) = self.run_propagation() {
            self.clock.set_state(ClockState::Uninitialized);
            return Err(e);
        }
        self.clock.set_state(ClockState::Idle);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.clock.state() != ClockState::Uninitialized
    }

    /// Re-runs a full propagation pass without changing any state.
    ///
    /// Idempotent: with no intervening clock, reset or memory write, every
    /// port ends with the same value.
    pub fn propagate(&mut self) -> Result<()> {
        self.ensure_idle("propagate")?;
        self.clock.set_state(ClockState::Propagating);
        let result = self.run_propagation();
        self.clock.set_state(ClockState::Idle);
        result
    }

    /// Advances every sequential component by one clock edge and
    /// re-propagates.
    pub fn clock(&mut self) -> Result<()> {
        self.ensure_idle("clock")?;

        let committed = self.clock.edge(&self.ports, &mut self.components);
        self.stats.cycles += 1;
        self.stats.commits += committed;

        self.clock.set_state(ClockState::Propagating);
        let result = self.run_propagation();
        self.clock.set_state(ClockState::Idle);

        tracing::trace!(cycle = self.clock.cycle(), committed, "clock edge");
        result
    }

    /// Restores every sequential component to its reset value, reloads every
    /// address space from its initialization memories and re-propagates.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_idle("reset")?;

        self.clock.set_state(ClockState::Committing);
        self.clock.reset(&mut self.components);
        for space in &self.address_spaces {
            space.borrow_mut().reset();
        }
        self.stats.resets += 1;

        self.clock.set_state(ClockState::Propagating);
        let result = self.run_propagation();
        self.clock.set_state(ClockState::Idle);

        tracing::debug!(design = %self.name, "reset");
        result
    }

    fn run_propagation(&mut self) -> Result<()> {
        let resolved =
            Resolver::new(&mut self.ports, &mut self.components, &self.netlist).run()?;
        self.stats.propagations += 1;
        self.stats.ports_resolved += resolved;
        Ok(())
    }

    fn ensure_building(&self, op: &'static str) -> Result<()> {
        if self.is_initialized() {
            Err(RuntimeError::AlreadyInitialized(op).into())
        } else {
            Ok(())
        }
    }

    fn ensure_idle(&self, op: &'static str) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(RuntimeError::UninitializedAccess(op).into())
        }
    }

    pub fn clock_state(&self) -> ClockState {
        self.clock.state()
    }

    /// Number of clock edges since initialization or the last reset.
    pub fn cycle_count(&self) -> u64 {
        self.clock.cycle()
    }

    /// Resolved value of a port.
    ///
    /// # Panics
    ///
    /// Panics if `port` was not issued by this design.
    pub fn value(&self, port: PortId) -> u64 {
        self.ports[port.0].value
    }

    /// The port behind an identifier.
    ///
    /// # Panics
    ///
    /// Panics if `port` was not issued by this design.
    pub fn port(&self, port: PortId) -> &Port {
        &self.ports[port.0]
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Identifiers of every port, in allocation order.
    pub fn port_ids(&self) -> impl Iterator<Item = PortId> {
        (0..self.ports.len()).map(PortId)
    }

    /// The component behind an identifier.
    ///
    /// # Panics
    ///
    /// Panics if `component` was not issued by this design.
    pub fn component(&self, component: ComponentId) -> &Component {
        &self.components[component.0]
    }

    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId(i), c))
    }

    /// Components with no parent, in insertion order.
    pub fn top_level(&self) -> Vec<ComponentId> {
        self.components()
            .filter(|(_, c)| c.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Looks a component up by its dotted path.
    pub fn find_component(&self, path: &str) -> Option<ComponentId> {
        self.components
            .iter()
            .position(|c| c.path == path)
            .map(ComponentId)
    }

    /// Input port of `component` named `name`.
    ///
    /// # Panics
    ///
    /// Panics if `component` was not issued by this design.
    pub fn input(&self, component: ComponentId, name: &str) -> Option<PortId> {
        self.components[component.0]
            .inputs
            .iter()
            .copied()
            .find(|p| self.ports[p.0].name == name)
    }

    /// Output port of `component` named `name`.
    ///
    /// # Panics
    ///
    /// Panics if `component` was not issued by this design.
    pub fn output(&self, component: ComponentId, name: &str) -> Option<PortId> {
        self.components[component.0]
            .outputs
            .iter()
            .copied()
            .find(|p| self.ports[p.0].name == name)
    }

    /// Looks a port up by `component.path.port`.
    pub fn find_port(&self, path: &str) -> Option<PortId> {
        let (component, port) = path.rsplit_once('.')?;
        let id = self.find_component(component)?;
        self.output(id, port).or_else(|| self.input(id, port))
    }

    /// Dotted path of a port (`cpu.alu.out`).
    ///
    /// # Panics
    ///
    /// Panics if `port` was not issued by this design.
    pub fn port_path(&self, port: PortId) -> String {
        let p = &self.ports[port.0];
        format!("{}.{}", self.components[p.owner.0].path, p.name)
    }

    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    /// Input ports that still lack a driver.
    pub fn unconnected_inputs(&self) -> Vec<PortId> {
        verify::unconnected_inputs(&self.components, &self.netlist)
    }

    pub fn sequential_components(&self) -> &[ComponentId] {
        self.clock.sequential()
    }

    /// Address spaces reloaded by `reset`.
    pub fn address_spaces(&self) -> &[SharedAddressSpace] {
        &self.address_spaces
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }
}

impl std::fmt::Debug for Design {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Design")
            .field("name", &self.name)
            .field("components", &self.components.len())
            .field("ports", &self.ports.len())
            .field("connections", &self.netlist.len())
            .field("state", &self.clock.state())
            .finish()
    }
}
