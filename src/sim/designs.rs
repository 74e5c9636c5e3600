//! Reference Designs.
//!
//! Small circuits used by the simulator binary and by the integration
//! tests. Each builder returns a design that is wired but not yet verified.
//!
//! * `and_gate`: two constant 0 sources into an AND gate feeding a register.
//! * `accumulator`: a register that adds a constant to itself every cycle.
//! * `memory_counter`: a program counter stepping through a word-wide
//!   memory. Each fetched word is decoded into a store that lands in either
//!   the console or the system controller, both memory-mapped into the same
//!   address space.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use crate::common::Result;
use crate::components::{Adder, Constant, FnComponent, LogicGate, Memory, Register};
use crate::config::{Config, DesignKind, MemoryConfig};
use crate::core::Design;
use crate::soc::devices::console::CONSOLE_SIZE;
use crate::soc::devices::syscon::SYSCON_SIZE;
use crate::soc::devices::{Console, SysCon};
use crate::soc::{AddressSpaceMM, SharedAddressSpace};

/// Decoded words with this top byte are system controller commands.
const SYSCON_OPCODE: u32 = 0xff;

/// Program run by the memory counter when no image is configured: print a
/// greeting, then power off.
const GREETING: &[u8] = b"Hello from rtl-sim\n";
const POWEROFF_WORD: u32 = 0xff00_5555;

/// A design together with the peripheral handles the harness observes.
pub struct Bench {
    pub design: Design,
    /// Exit flag of the system controller, if the design maps one.
    pub exit_signal: Option<Arc<AtomicU64>>,
    /// Bytes written to the console, if the design maps one.
    pub console: Option<Rc<RefCell<Vec<u8>>>>,
}

impl Bench {
    fn plain(design: Design) -> Self {
        Self {
            design,
            exit_signal: None,
            console: None,
        }
    }

    /// Exit code requested by the simulated program, once it asked to stop.
    pub fn exit_code(&self) -> Option<u64> {
        self.exit_signal.as_deref().and_then(SysCon::exit_code)
    }

    /// Console output so far, lossily decoded.
    pub fn console_text(&self) -> String {
        self.console
            .as_ref()
            .map(|out| String::from_utf8_lossy(&out.borrow()).into_owned())
            .unwrap_or_default()
    }
}

/// Builds the design selected by `config`. `image` replaces the built-in
/// program of the memory-backed designs.
pub fn build(config: &Config, image: Option<Vec<u8>>) -> Result<Bench> {
    match config.design.kind {
        DesignKind::AndGate => and_gate().map(Bench::plain),
        DesignKind::Accumulator => {
            accumulator(config.design.width, config.design.increment).map(Bench::plain)
        }
        DesignKind::MemoryCounter => memory_counter(&config.memory, image),
    }
}

/// Two constant 0 sources into a 1-bit AND gate feeding a 1-bit register.
pub fn and_gate() -> Result<Design> {
    let mut design = Design::new("and_gate");
    let c0 = design.add_component("c0", Constant::new(1, 0))?;
    let c1 = design.add_component("c1", Constant::new(1, 0))?;
    let and = design.add_component("and", LogicGate::and(1, 2))?;
    let reg = design.add_component("reg", Register::new(1, 0))?;

    design.wire(c0, "out", and, "in0")?;
    design.wire(c1, "out", and, "in1")?;
    design.wire(and, "out", reg, "in")?;
    Ok(design)
}

/// A `width`-bit register adding `increment` to itself on every clock edge.
///
/// Ports of interest: `acc.out` (the running sum) and `adder.out` (the
/// value loaded on the next edge).
pub fn accumulator(width: u32, increment: u64) -> Result<Design> {
    let mut design = Design::new("accumulator");
    let step = design.add_component("step", Constant::new(width, increment))?;
    let adder = design.add_component("adder", Adder::new(width))?;
    let acc = design.add_component("acc", Register::new(width, 0))?;

    design.wire(acc, "out", adder, "a")?;
    design.wire(step, "out", adder, "b")?;
    design.wire(adder, "out", acc, "in")?;
    Ok(design)
}

/// A fetch/store loop over a memory-mapped address space.
///
/// `pc` starts at the configured load address and advances by one word per
/// cycle. The word fetched at `pc` is decoded as:
///
/// * `0xff00_xxxx`: store `xxxx` to the system controller,
/// * any other non-zero word: store its low byte to the console,
/// * zero: no store.
pub fn memory_counter(memory: &MemoryConfig, image: Option<Vec<u8>>) -> Result<Bench> {
    let load_addr = memory.load_addr_val();
    let syscon_base = memory.syscon_base_val();
    let console_base = memory.console_base_val();

    let syscon = SysCon::new();
    let exit_signal = syscon.exit_signal();
    let console = Console::new();
    let output = console.output();

    let mut mm = AddressSpaceMM::new();
    mm.add_io_region(syscon_base, SYSCON_SIZE, syscon)?;
    mm.add_io_region(console_base, CONSOLE_SIZE, console)?;
    match image {
        Some(data) => mm.add_initialization_memory(load_addr, &data),
        None => {
            let words: Vec<u32> = GREETING
                .iter()
                .map(|&b| u32::from(b))
                .chain(std::iter::once(POWEROFF_WORD))
                .collect();
            mm.add_initialization_words(load_addr, &words);
        }
    }
    mm.reset();
    let space: SharedAddressSpace = Rc::new(RefCell::new(mm));

    let decoder = FnComponent::new(
        "Decoder",
        &[("word", 32)],
        &[("addr", 32), ("data", 32), ("valid", 1)],
        move |output: usize, inputs: &[u64]| {
            let word = inputs[0] as u32;
            let syscon = word >> 24 == SYSCON_OPCODE;
            let value = match (output, syscon) {
                (0, true) => syscon_base,
                (0, false) => console_base,
                (1, true) => word & 0xffff,
                (1, false) => word & 0xff,
                _ => u32::from(word != 0),
            };
            u64::from(value)
        },
    );

    let mut design = Design::new("memory_counter");
    let pc = design.add_component("pc", Register::new(32, u64::from(load_addr)))?;
    let step = design.add_component("step", Constant::new(32, 4))?;
    let next = design.add_component("next", Adder::new(32))?;
    let zero = design.add_component("zero", Constant::new(32, 0))?;
    let read_only = design.add_component("read_only", Constant::new(1, 0))?;
    let fetch = design.add_component("fetch", Memory::new(space.clone(), 32, 32))?;
    let decode = design.add_component("decode", decoder)?;
    let store = design.add_component("store", Memory::new(space, 32, 32))?;

    design.wire(pc, "out", next, "a")?;
    design.wire(step, "out", next, "b")?;
    design.wire(next, "out", pc, "in")?;

    design.wire(pc, "out", fetch, "addr")?;
    design.wire(zero, "out", fetch, "data_in")?;
    design.wire(read_only, "out", fetch, "wr_en")?;

    design.wire(fetch, "data_out", decode, "word")?;
    design.wire(decode, "addr", store, "addr")?;
    design.wire(decode, "data", store, "data_in")?;
    design.wire(decode, "valid", store, "wr_en")?;

    Ok(Bench {
        design,
        exit_signal: Some(exit_signal),
        console: Some(output),
    })
}
