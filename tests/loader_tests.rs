//! Tests for the binary image loader.

use std::io::Write;

use rtl_sim::common::SimError;
use rtl_sim::sim::loader;
use rtl_sim::soc::AddressSpace;

/// Tests that a file is read byte for byte.
#[test]
fn test_load_image() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0x13, 0x00, 0x00, 0x00, 0xFF]).unwrap();

    let data = loader::load_image(file.path()).unwrap();
    assert_eq!(data, vec![0x13, 0x00, 0x00, 0x00, 0xFF]);
}

/// Tests that a missing file reports its path.
#[test]
fn test_missing_image() {
    let err = loader::load_image("/nonexistent/image.bin").unwrap_err();
    match err {
        SimError::Image { path, .. } => assert_eq!(path.to_str(), Some("/nonexistent/image.bin")),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Tests that a loaded image becomes visible after the next reset.
#[test]
fn test_load_into_address_space() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&0xDEAD_BEEFu32.to_le_bytes()).unwrap();

    let mut mem = AddressSpace::new();
    let size = loader::load_into(&mut mem, file.path(), 0x200).unwrap();
    assert_eq!(size, 4);
    assert!(!mem.contains(0x200));

    mem.reset();
    assert_eq!(mem.read_mem_const(0x200, 4), 0xDEAD_BEEF);
}
