//! Sparse Address Space.
//!
//! A byte-addressable memory of unbounded size over the 32-bit address
//! range, stored sparsely. Initialization memories (preloaded program or
//! data images) are kept separately and written back into the live map in
//! registration order on every reset, so a later image shadows an earlier
//! one wherever they overlap.

use std::collections::{BTreeMap, HashMap};

use super::traits::Addressable;

/// Number of bytes a value can hold.
const VALUE_BYTES: u32 = u64::BITS / 8;

/// An image replayed into an address space on reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitializationMemory {
    pub start: u32,
    pub data: Vec<u8>,
}

/// Sparse byte-addressable memory.
#[derive(Clone, Debug, Default)]
pub struct AddressSpace {
    data: HashMap<u32, u8>,
    init: Vec<InitializationMemory>,
}

impl AddressSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the low `size` bytes of `value`, little-endian, from `address`.
    pub fn write_mem(&mut self, address: u32, mut value: u64, size: u32) {
        for i in 0..size {
            self.data.insert(address.wrapping_add(i), (value & 0xff) as u8);
            value = value.checked_shr(8).unwrap_or(0);
        }
    }

    /// Reads `width` bytes, little-endian, from `address`.
    ///
    /// Absent addresses read as zero and are inserted into the map.
    pub fn read_mem(&mut self, address: u32, width: u32) -> u64 {
        let mut value = 0u64;
        for i in 0..width {
            let byte = *self.data.entry(address.wrapping_add(i)).or_insert(0);
            if i < VALUE_BYTES {
                value |= u64::from(byte) << (i * 8);
            }
        }
        value
    }

    /// Reads `width` bytes without inserting absent addresses.
    pub fn read_mem_const(&self, address: u32, width: u32) -> u64 {
        (0..width.min(VALUE_BYTES)).fold(0u64, |value, i| {
            let byte = self.data.get(&address.wrapping_add(i)).copied().unwrap_or(0);
            value | u64::from(byte) << (i * 8)
        })
    }

    /// Whether a live entry exists at `address`. Initialization memories are
    /// not consulted.
    pub fn contains(&self, address: u32) -> bool {
        self.data.contains_key(&address)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Live contents ordered by address.
    pub fn entries(&self) -> BTreeMap<u32, u8> {
        self.data.iter().map(|(&a, &b)| (a, b)).collect()
    }

    /// Records `data` as an image starting at `start`.
    pub fn add_initialization_memory(&mut self, start: u32, data: &[u8]) {
        self.init.push(InitializationMemory {
            start,
            data: data.to_vec(),
        });
    }

    /// Records `words` as little-endian 32-bit words starting at `start`.
    pub fn add_initialization_words(&mut self, start: u32, words: &[u32]) {
        let data: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.add_initialization_memory(start, &data);
    }

    pub fn clear_initialization_memories(&mut self) {
        self.init.clear();
    }

    /// Recorded images in registration order.
    pub fn initialization_memories(&self) -> &[InitializationMemory] {
        &self.init
    }

    /// Clears the live map and replays every image in registration order.
    pub fn reset(&mut self) {
        self.data.clear();
        for image in &self.init {
            for (i, &byte) in image.data.iter().enumerate() {
                self.data.insert(image.start.wrapping_add(i as u32), byte);
            }
        }
    }

    /// Drops the live contents only.
    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }
}

impl Addressable for AddressSpace {
    fn write_mem(&mut self, address: u32, value: u64, size: u32) {
        AddressSpace::write_mem(self, address, value, size)
    }

    fn read_mem(&mut self, address: u32, width: u32) -> u64 {
        AddressSpace::read_mem(self, address, width)
    }

    fn read_mem_const(&self, address: u32, width: u32) -> u64 {
        AddressSpace::read_mem_const(self, address, width)
    }

    fn contains(&self, address: u32) -> bool {
        AddressSpace::contains(self, address)
    }

    fn add_initialization_memory(&mut self, start: u32, data: &[u8]) {
        AddressSpace::add_initialization_memory(self, start, data)
    }

    fn clear_initialization_memories(&mut self) {
        AddressSpace::clear_initialization_memories(self)
    }

    fn reset(&mut self) {
        AddressSpace::reset(self)
    }
}
