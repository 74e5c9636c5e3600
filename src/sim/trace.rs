//! Per-Cycle Port Snapshots.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::Design;

/// Values of a set of ports after a clock edge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub cycle: u64,
    /// Port values keyed by dotted port path.
    pub ports: BTreeMap<String, u64>,
}

impl Snapshot {
    /// Captures the ports named in `watch`, or every port when `watch` is
    /// empty. Unknown paths are skipped.
    pub fn capture(design: &Design, watch: &[String]) -> Self {
        let ports = if watch.is_empty() {
            design
                .port_ids()
                .map(|id| (design.port_path(id), design.value(id)))
                .collect()
        } else {
            watch
                .iter()
                .filter_map(|path| design.find_port(path).map(|id| (path.clone(), design.value(id))))
                .collect()
        };
        Self {
            cycle: design.cycle_count(),
            ports,
        }
    }

    /// One JSON object per line.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cycle {:>6}:", self.cycle)?;
        for (path, value) in &self.ports {
            write!(f, " {}={:#x}", path, value)?;
        }
        Ok(())
    }
}
