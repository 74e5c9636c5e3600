//! Design Verification.
//!
//! Structural checks run by `verify_and_initialize` before the first
//! propagation pass. Strict cycles are not checked here: the first pass
//! surfaces them as a side effect of resolving every port.

use super::component::Component;
use super::netlist::Netlist;
use super::port::{Port, PortId};
use crate::common::ConfigError;

/// Every input port of every component has exactly one driver.
///
/// The netlist refuses a second driver at connect time, so only missing
/// drivers are looked for. Components and ports are visited in declaration
/// order, so the reported port is deterministic.
pub(crate) fn check_inputs_connected(
    components: &[Component],
    ports: &[Port],
    netlist: &Netlist,
) -> Result<(), ConfigError> {
    match unconnected_inputs(components, netlist).into_iter().next() {
        Some(port) => {
            let p = &ports[port.0];
            Err(ConfigError::UnconnectedInput {
                component: components[p.owner.0].path.clone(),
                port: p.name.clone(),
            })
        }
        None => Ok(()),
    }
}

/// All input ports without a driver, in declaration order.
pub(crate) fn unconnected_inputs(components: &[Component], netlist: &Netlist) -> Vec<PortId> {
    components
        .iter()
        .flat_map(|c| c.inputs.iter().copied())
        .filter(|&port| netlist.driver(port).is_none())
        .collect()
}
