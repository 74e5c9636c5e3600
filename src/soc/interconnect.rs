//! Memory-Mapped Address Space.
//!
//! Extends [`AddressSpace`] with windows whose accesses are forwarded to
//! peripheral handlers instead of the sparse backing store. Only the first
//! address of an access is decoded: an access starting in plain memory is
//! served by plain memory even if it runs into a window.

use std::collections::BTreeMap;

use super::address_space::{AddressSpace, InitializationMemory};
use super::traits::{Addressable, IoHandler, RegionType};
use crate::common::{mask, ConfigError};

/// A memory-mapped peripheral window.
pub struct IoRegion {
    base: u32,
    size: u32,
    handler: Box<dyn IoHandler>,
}

impl IoRegion {
    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Last address covered by the window.
    pub fn last(&self) -> u32 {
        self.base + (self.size - 1)
    }

    pub fn handler(&self) -> &dyn IoHandler {
        self.handler.as_ref()
    }
}

impl std::fmt::Debug for IoRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IoRegion")
            .field("name", &self.handler.name())
            .field("base", &format_args!("{:#010x}", self.base))
            .field("size", &self.size)
            .finish()
    }
}

/// Address space with memory-mapped I/O windows.
#[derive(Debug, Default)]
pub struct AddressSpaceMM {
    space: AddressSpace,
    /// Windows keyed by their last address, so the first key at or above an
    /// address is the only window that can contain it.
    regions: BTreeMap<u32, IoRegion>,
}

impl AddressSpaceMM {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a window of `size` bytes at `base` served by `handler`.
    ///
    /// # Errors
    ///
    /// `EmptyRegion` if `size` is zero, `OverlappingRegion` if the window
    /// shares any address with a registered one or runs past the top of the
    /// 32-bit address range.
    pub fn add_io_region(
        &mut self,
        base: u32,
        size: u32,
        handler: impl IoHandler + 'static,
    ) -> Result<(), ConfigError> {
        if size == 0 {
            return Err(ConfigError::EmptyRegion { base });
        }
        let last = base
            .checked_add(size - 1)
            .ok_or(ConfigError::OverlappingRegion { base, size })?;

        let overlaps = self
            .regions
            .range(base..)
            .next()
            .is_some_and(|(_, r)| r.base <= last);
        if overlaps {
            return Err(ConfigError::OverlappingRegion { base, size });
        }

        tracing::debug!(
            "registered I/O region '{}' at {:#010x} (+{:#x})",
            handler.name(),
            base,
            size
        );
        self.regions.insert(
            last,
            IoRegion {
                base,
                size,
                handler: Box::new(handler),
            },
        );
        Ok(())
    }

    /// Unregisters the window registered with exactly `base` and `size`,
    /// returning its handler.
    ///
    /// # Errors
    ///
    /// `UnknownRegion` if no such window exists.
    pub fn remove_io_region(
        &mut self,
        base: u32,
        size: u32,
    ) -> Result<Box<dyn IoHandler>, ConfigError> {
        let unknown = ConfigError::UnknownRegion { base, size };
        let last = size
            .checked_sub(1)
            .and_then(|s| base.checked_add(s))
            .ok_or(unknown.clone())?;

        match self.regions.get(&last) {
            Some(r) if r.base == base => {}
            _ => return Err(unknown),
        }
        let region = self.regions.remove(&last).ok_or(unknown)?;
        tracing::debug!(
            "removed I/O region '{}' at {:#010x}",
            region.handler.name(),
            base
        );
        Ok(region.handler)
    }

    /// The window containing `address`, if any.
    pub fn find_region(&self, address: u32) -> Option<&IoRegion> {
        self.regions
            .range(address..)
            .next()
            .map(|(_, r)| r)
            .filter(|r| address >= r.base)
    }

    fn find_region_mut(&mut self, address: u32) -> Option<&mut IoRegion> {
        self.regions
            .range_mut(address..)
            .next()
            .map(|(_, r)| r)
            .filter(|r| address >= r.base)
    }

    /// Registered windows ordered by address.
    pub fn io_regions(&self) -> impl Iterator<Item = &IoRegion> {
        self.regions.values()
    }

    pub fn region_type(&self, address: u32) -> RegionType {
        if self.find_region(address).is_some() {
            RegionType::Io
        } else {
            RegionType::Program
        }
    }

    pub fn write_mem(&mut self, address: u32, value: u64, size: u32) {
        match self.find_region_mut(address) {
            Some(region) => region.handler.write(address - region.base, value, size),
            None => self.space.write_mem(address, value, size),
        }
    }

    /// Reads `width` bytes. Values returned by a window's handler are cut
    /// to the requested width.
    pub fn read_mem(&mut self, address: u32, width: u32) -> u64 {
        match self.find_region(address) {
            Some(region) => forwarded(region, address, width),
            None => self.space.read_mem(address, width),
        }
    }

    pub fn read_mem_const(&self, address: u32, width: u32) -> u64 {
        match self.find_region(address) {
            Some(region) => forwarded(region, address, width),
            None => self.space.read_mem_const(address, width),
        }
    }

    /// Whether the sparse store holds an entry at `address`. Windows are not
    /// consulted.
    pub fn contains(&self, address: u32) -> bool {
        self.space.contains(address)
    }

    /// The plain backing store.
    pub fn backing(&self) -> &AddressSpace {
        &self.space
    }

    pub fn add_initialization_memory(&mut self, start: u32, data: &[u8]) {
        self.space.add_initialization_memory(start, data);
    }

    pub fn add_initialization_words(&mut self, start: u32, words: &[u32]) {
        self.space.add_initialization_words(start, words);
    }

    pub fn clear_initialization_memories(&mut self) {
        self.space.clear_initialization_memories();
    }

    pub fn initialization_memories(&self) -> &[InitializationMemory] {
        self.space.initialization_memories()
    }

    /// Clears the backing store and replays the initialization memories
    /// through the window-aware write path, so image bytes landing in a
    /// window are delivered to its peripheral.
    pub fn reset(&mut self) {
        self.space.clear();
        let images = self.space.initialization_memories().to_vec();
        for image in &images {
            for (i, &byte) in image.data.iter().enumerate() {
                self.write_mem(image.start.wrapping_add(i as u32), u64::from(byte), 1);
            }
        }
    }
}

fn forwarded(region: &IoRegion, address: u32, width: u32) -> u64 {
    region.handler.read(address - region.base, width) & mask(width.min(8) * 8)
}

impl Addressable for AddressSpaceMM {
    fn write_mem(&mut self, address: u32, value: u64, size: u32) {
        AddressSpaceMM::write_mem(self, address, value, size)
    }

    fn read_mem(&mut self, address: u32, width: u32) -> u64 {
        AddressSpaceMM::read_mem(self, address, width)
    }

    fn read_mem_const(&self, address: u32, width: u32) -> u64 {
        AddressSpaceMM::read_mem_const(self, address, width)
    }

    fn contains(&self, address: u32) -> bool {
        AddressSpaceMM::contains(self, address)
    }

    fn region_type(&self, address: u32) -> RegionType {
        AddressSpaceMM::region_type(self, address)
    }

    fn add_initialization_memory(&mut self, start: u32, data: &[u8]) {
        AddressSpaceMM::add_initialization_memory(self, start, data)
    }

    fn clear_initialization_memories(&mut self) {
        AddressSpaceMM::clear_initialization_memories(self)
    }

    fn reset(&mut self) {
        AddressSpaceMM::reset(self)
    }
}
