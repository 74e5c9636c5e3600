//! Address-Space Traits.
//!
//! This module defines the interface memory components use to reach an
//! address space, and the interface peripherals implement to serve accesses
//! forwarded from a memory-mapped window.

use std::cell::RefCell;
use std::rc::Rc;

/// Classification of an address, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionType {
    /// Plain sparse memory.
    Program,
    /// A memory-mapped peripheral window.
    Io,
}

/// Byte-addressable memory with little-endian multi-byte accesses.
///
/// Widths and sizes are in bytes. Values wider than 8 bytes cannot be
/// represented; the extra bytes are written as zero and ignored on reads.
pub trait Addressable {
    /// Writes the low `size` bytes of `value` starting at `address`.
    fn write_mem(&mut self, address: u32, value: u64, size: u32);

    /// Reads `width` bytes starting at `address`.
    ///
    /// Untouched addresses read as zero; plain memory creates entries for
    /// them as a side effect.
    fn read_mem(&mut self, address: u32, width: u32) -> u64;

    /// Reads `width` bytes without creating entries.
    fn read_mem_const(&self, address: u32, width: u32) -> u64;

    /// Whether a live entry exists at `address`.
    fn contains(&self, address: u32) -> bool;

    fn region_type(&self, _address: u32) -> RegionType {
        RegionType::Program
    }

    /// Records an image replayed into the space on every reset.
    fn add_initialization_memory(&mut self, start: u32, data: &[u8]);

    fn clear_initialization_memories(&mut self);

    /// Clears live contents and replays the initialization memories.
    fn reset(&mut self);
}

/// Address space shared between the design and its memory components.
pub type SharedAddressSpace = Rc<RefCell<dyn Addressable>>;

/// Trait for peripherals behind a memory-mapped I/O window.
///
/// Offsets are relative to the window base; widths are in bytes. Handlers
/// run in-line during the memory access and must not block.
pub trait IoHandler {
    /// Returns a user-friendly name of the peripheral.
    fn name(&self) -> &str {
        "io"
    }

    fn read(&self, offset: u32, width: u32) -> u64;

    fn write(&mut self, offset: u32, value: u64, width: u32);
}

/// An [`IoHandler`] built from two closures.
pub struct IoFunctors {
    read: Box<dyn Fn(u32, u32) -> u64>,
    write: Box<dyn FnMut(u32, u64, u32)>,
}

impl IoFunctors {
    /// # Arguments
    ///
    /// * `read` - Called with `(offset, width)`; returns the value read.
    /// * `write` - Called with `(offset, value, width)`.
    pub fn new(
        read: impl Fn(u32, u32) -> u64 + 'static,
        write: impl FnMut(u32, u64, u32) + 'static,
    ) -> Self {
        Self {
            read: Box::new(read),
            write: Box::new(write),
        }
    }

    /// A window whose writes are discarded.
    pub fn read_only(read: impl Fn(u32, u32) -> u64 + 'static) -> Self {
        Self::new(read, |_, _, _| {})
    }
}

impl IoHandler for IoFunctors {
    fn read(&self, offset: u32, width: u32) -> u64 {
        (self.read)(offset, width)
    }

    fn write(&mut self, offset: u32, value: u64, width: u32) {
        (self.write)(offset, value, width)
    }
}
