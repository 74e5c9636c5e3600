//! Binary Image Loader.
//!
//! Reads raw binary files (programs, data tables) from disk and records them
//! as initialization memories, so every reset of the address space restores
//! the image.

use std::fs;
use std::path::Path;

use crate::common::{Result, SimError};
use crate::soc::Addressable;

/// Loads a binary file from disk.
pub fn load_image(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| SimError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a binary file and records it as an initialization memory of
/// `space` starting at `addr`.
///
/// The image only becomes visible in the live map on the next reset of the
/// space. Returns the image size in bytes.
pub fn load_into(space: &mut dyn Addressable, path: impl AsRef<Path>, addr: u32) -> Result<usize> {
    let path = path.as_ref();
    let data = load_image(path)?;
    tracing::info!(
        "[Loader] Loading {} ({} bytes) @ {:#010x}",
        path.display(),
        data.len(),
        addr
    );
    space.add_initialization_memory(addr, &data);
    Ok(data.len())
}
