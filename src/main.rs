//! RTL Circuit Simulator CLI.
//!
//! Builds one of the reference designs, verifies it and clocks it for a
//! configured number of cycles, printing port snapshots along the way.
//!
//! # Usage
//!
//! ```text
//! rtl-sim --config configs/default.toml --cycles 32 --json
//! ```
//!
//! The memory-backed design stops early once the simulated program writes
//! to the system controller; its exit code becomes the process exit code.

use clap::Parser;
use std::process;

use rtl_sim::common::Result;
use rtl_sim::config::Config;
use rtl_sim::sim::{designs, loader, Bench, Snapshot};

/// Command-line arguments for the circuit simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-based RTL circuit simulator")]
struct Args {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Number of clock cycles to run, overriding the configuration.
    #[arg(long)]
    cycles: Option<u64>,

    /// Emit per-cycle snapshots as JSON lines.
    #[arg(long)]
    json: bool,

    /// Raw binary preloaded into the design's memory.
    #[arg(long)]
    image: Option<String>,
}

/// Main entry point for the circuit simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses command-line arguments and loads the TOML configuration file.
/// 2. **Construction**: Builds the selected reference design and verifies it.
/// 3. **Simulation Loop**: Clocks the design, printing snapshots when tracing is enabled,
///    until the cycle budget is spent or the program requests an exit.
/// 4. **Teardown**: Prints simulation statistics and exits with the program's exit code.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            tracing::error!("{e}");
            process::exit(1);
        }
    }
}

fn run(args: Args) -> Result<i32> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(cycles) = args.cycles {
        config.general.cycles = cycles;
    }
    if args.json {
        config.general.json = true;
    }
    if let Some(image) = args.image {
        config.memory.image = Some(image);
    }
    let trace = config.general.trace || config.general.json || cfg!(feature = "always-trace");

    let image = config
        .memory
        .image
        .as_deref()
        .map(loader::load_image)
        .transpose()?;

    let mut bench = designs::build(&config, image)?;
    bench.design.verify_and_initialize()?;

    println!("Design Configuration");
    println!("--------------------");
    println!("  Design:             {:?}", config.design.kind);
    println!("  Components:         {}", bench.design.components().count());
    println!("  Ports:              {}", bench.design.ports().len());
    println!("  Connections:        {}", bench.design.netlist().len());
    println!("  Sequential:         {}", bench.design.sequential_components().len());
    println!("  Cycles:             {}", config.general.cycles);

    if trace {
        emit(&bench, &config)?;
    }
    for _ in 0..config.general.cycles {
        bench.design.clock()?;
        if trace {
            emit(&bench, &config)?;
        }
        if bench.exit_code().is_some() {
            break;
        }
    }

    let code = bench.exit_code().unwrap_or(0);
    if bench.console.is_some() {
        print!("{}", bench.console_text());
    }
    println!("\n[*] Exiting with code {}", code);
    bench.design.stats().print();
    Ok(code as i32)
}

fn emit(bench: &Bench, config: &Config) -> Result<()> {
    let snapshot = Snapshot::capture(&bench.design, &config.design.watch);
    if config.general.json {
        println!("{}", snapshot.to_json()?);
    } else {
        println!("{}", snapshot);
    }
    Ok(())
}
