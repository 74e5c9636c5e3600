//! Register File.
//!
//! A bank of equally wide registers with two asynchronous read ports and
//! one write port committed on the clock edge. Register 0 may be hardwired
//! to zero, as in most load/store architectures.

use crate::common::{mask, width_for};
use crate::core::{Class, InputDecl, Logic, OutputDecl};

const RADDR1: usize = 0;
const RADDR2: usize = 1;
const WADDR: usize = 2;
const WDATA: usize = 3;
const WR_EN: usize = 4;

/// Register bank with two read ports and one write port.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    width: u32,
    regs: Vec<u64>,
    zero_register: bool,
    pending: Option<(usize, u64)>,
}

impl RegisterFile {
    /// Creates a bank of `count` registers, all reset to zero.
    pub fn new(count: usize, width: u32) -> Self {
        Self {
            width,
            regs: vec![0; count],
            zero_register: false,
            pending: None,
        }
    }

    /// Makes register 0 read as zero and ignore writes.
    pub fn with_zero_register(mut self) -> Self {
        self.zero_register = true;
        self
    }

    /// Width of the address ports.
    pub fn address_width(&self) -> u32 {
        width_for(self.regs.len())
    }

    /// Reads a register. Out-of-range indices read as zero.
    pub fn read(&self, idx: usize) -> u64 {
        if self.zero_register && idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Current contents of every register.
    pub fn registers(&self) -> &[u64] {
        &self.regs
    }
}

impl Logic for RegisterFile {
    fn type_name(&self) -> &'static str {
        "RegisterFile"
    }

    fn inputs(&self) -> Vec<InputDecl> {
        let aw = self.address_width();
        vec![
            InputDecl::new("raddr1", aw),
            InputDecl::new("raddr2", aw),
            InputDecl::new("waddr", aw),
            InputDecl::new("wdata", self.width),
            InputDecl::new("wr_en", 1),
        ]
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        vec![
            OutputDecl::comb_on("rdata1", self.width, vec![RADDR1]),
            OutputDecl::comb_on("rdata2", self.width, vec![RADDR2]),
        ]
    }

    fn class(&self) -> Class {
        Class::Sequential
    }

    fn evaluate(&mut self, output: usize, inputs: &[u64]) -> u64 {
        let addr = if output == 0 { inputs[RADDR1] } else { inputs[RADDR2] };
        self.read(addr as usize)
    }

    fn capture(&mut self, inputs: &[u64]) {
        self.pending = (inputs[WR_EN] & 1 == 1)
            .then(|| (inputs[WADDR] as usize, inputs[WDATA] & mask(self.width)));
    }

    fn commit(&mut self) {
        if let Some((idx, value)) = self.pending.take() {
            if self.zero_register && idx == 0 {
                return;
            }
            if let Some(reg) = self.regs.get_mut(idx) {
                *reg = value;
            }
        }
    }

    fn reset(&mut self) {
        self.regs.iter_mut().for_each(|r| *r = 0);
        self.pending = None;
    }
}
