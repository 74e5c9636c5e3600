//! Memory Components.
//!
//! Both components read asynchronously: `data_out` follows `addr` within
//! the same propagation pass. [`Memory`] also writes synchronously: a write
//! presented on `data_in` with `wr_en` set lands in the address space at the
//! clock edge. Accesses go through the shared address space, so reads and
//! writes that hit a memory-mapped window reach the peripheral behind it.

use crate::core::{Class, InputDecl, Logic, OutputDecl};
use crate::soc::SharedAddressSpace;

const ADDR: usize = 0;
const DATA_IN: usize = 1;
const WR_EN: usize = 2;

/// Widest address port a memory accepts.
const MAX_ADDR_WIDTH: u32 = 32;

fn byte_width(bits: u32) -> u32 {
    bits.div_ceil(8)
}

/// Read/write memory with asynchronous read and synchronous write.
pub struct Memory {
    space: SharedAddressSpace,
    addr_width: u32,
    data_width: u32,
    pending: Option<(u32, u64)>,
}

impl Memory {
    /// `addr_width` is clamped to 32 bits.
    pub fn new(space: SharedAddressSpace, addr_width: u32, data_width: u32) -> Self {
        Self {
            space,
            addr_width: addr_width.min(MAX_ADDR_WIDTH),
            data_width,
            pending: None,
        }
    }
}

impl Logic for Memory {
    fn type_name(&self) -> &'static str {
        "Memory"
    }

    fn inputs(&self) -> Vec<InputDecl> {
        vec![
            InputDecl::new("addr", self.addr_width),
            InputDecl::new("data_in", self.data_width),
            InputDecl::new("wr_en", 1),
        ]
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        vec![OutputDecl::comb_on("data_out", self.data_width, vec![ADDR])]
    }

    fn class(&self) -> Class {
        Class::Sequential
    }

    fn evaluate(&mut self, _output: usize, inputs: &[u64]) -> u64 {
        self.space
            .borrow_mut()
            .read_mem(inputs[ADDR] as u32, byte_width(self.data_width))
    }

    fn capture(&mut self, inputs: &[u64]) {
        self.pending = (inputs[WR_EN] & 1 == 1).then(|| (inputs[ADDR] as u32, inputs[DATA_IN]));
    }

    fn commit(&mut self) {
        if let Some((addr, value)) = self.pending.take() {
            self.space
                .borrow_mut()
                .write_mem(addr, value, byte_width(self.data_width));
        }
    }

    fn reset(&mut self) {
        self.pending = None;
    }

    fn address_space(&self) -> Option<SharedAddressSpace> {
        Some(self.space.clone())
    }
}

/// Read-only memory, typically holding a program image.
pub struct Rom {
    space: SharedAddressSpace,
    addr_width: u32,
    data_width: u32,
}

impl Rom {
    /// `addr_width` is clamped to 32 bits.
    pub fn new(space: SharedAddressSpace, addr_width: u32, data_width: u32) -> Self {
        Self {
            space,
            addr_width: addr_width.min(MAX_ADDR_WIDTH),
            data_width,
        }
    }
}

impl Logic for Rom {
    fn type_name(&self) -> &'static str {
        "Rom"
    }

    fn inputs(&self) -> Vec<InputDecl> {
        vec![InputDecl::new("addr", self.addr_width)]
    }

    fn outputs(&self) -> Vec<OutputDecl> {
        vec![OutputDecl::comb("data_out", self.data_width)]
    }

    fn evaluate(&mut self, _output: usize, inputs: &[u64]) -> u64 {
        self.space
            .borrow_mut()
            .read_mem(inputs[ADDR] as u32, byte_width(self.data_width))
    }

    fn address_space(&self) -> Option<SharedAddressSpace> {
        Some(self.space.clone())
    }
}
