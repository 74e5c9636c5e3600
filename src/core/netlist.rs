//! Signal Connectivity.
//!
//! Connections are kept in an edge table separate from the component and
//! port arenas. Each destination input has at most one driver; a source
//! output may fan out to any number of inputs.

use super::port::PortId;

/// A directed edge from an output port to an input port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
    pub source: PortId,
    pub dest: PortId,
}

/// Edge table indexed by port.
#[derive(Debug, Default)]
pub struct Netlist {
    connections: Vec<Connection>,
    /// Index into `connections` of the edge driving each port.
    driver: Vec<Option<usize>>,
    /// Indices into `connections` of the edges leaving each port.
    fanout: Vec<Vec<usize>>,
}

impl Netlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes room for a newly allocated port.
    pub(crate) fn add_port(&mut self) {
        self.driver.push(None);
        self.fanout.push(Vec::new());
    }

    /// Records `source -> dest`. The caller checks directions and widths.
    pub(crate) fn connect(&mut self, source: PortId, dest: PortId) {
        let idx = self.connections.len();
        self.connections.push(Connection { source, dest });
        self.driver[dest.0] = Some(idx);
        self.fanout[source.0].push(idx);
    }

    /// The output port driving `port`, if any.
    pub fn driver(&self, port: PortId) -> Option<PortId> {
        self.driver
            .get(port.0)
            .copied()
            .flatten()
            .map(|idx| self.connections[idx].source)
    }

    /// Input ports driven by `port`.
    pub fn fanout(&self, port: PortId) -> impl Iterator<Item = PortId> + '_ {
        self.fanout
            .get(port.0)
            .into_iter()
            .flatten()
            .map(move |&idx| self.connections[idx].dest)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
