//! Simulation statistics collection and reporting.
//!
//! Tracks clock edges, propagation passes and reset counts for a design,
//! together with the host time spent simulating it.

use serde::Serialize;
use std::time::Instant;

/// Counters updated by a [`Design`](crate::core::Design) as it runs.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Clock edges applied.
    pub cycles: u64,
    /// Sequential components committed, summed over all edges.
    pub commits: u64,
    /// Full propagation passes, including the initial one.
    pub propagations: u64,
    /// Port values computed, summed over all passes.
    pub ports_resolved: u64,
    pub resets: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            commits: 0,
            propagations: 0,
            ports_resolved: 0,
            resets: 0,
        }
    }
}

impl SimStats {
    /// Host seconds elapsed since the statistics were created.
    pub fn host_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Prints a formatted summary of the simulation statistics.
    pub fn print(&self) {
        let seconds = self.host_seconds();
        let passes = self.propagations.max(1);
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };

        println!("\n==========================================================");
        println!("RTL SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("sim_resets               {}", self.resets);
        println!("----------------------------------------------------------");
        println!("PROPAGATION");
        println!("  passes                 {}", self.propagations);
        println!("  ports.resolved         {}", self.ports_resolved);
        println!(
            "  ports.per_pass         {:.2}",
            self.ports_resolved as f64 / passes as f64
        );
        println!("  commits                {}", self.commits);
        println!("==========================================================");
    }
}
