//! Integration tests for memory-mapped I/O forwarding and peripherals.

use std::cell::RefCell;
use std::rc::Rc;

use rtl_sim::common::ConfigError;
use rtl_sim::soc::devices::console::{CONSOLE_COUNT, CONSOLE_SIZE};
use rtl_sim::soc::devices::syscon::SYSCON_SIZE;
use rtl_sim::soc::devices::{Console, SysCon};
use rtl_sim::soc::{AddressSpaceMM, IoFunctors, IoHandler, RegionType};

type WriteLog = Rc<RefCell<Vec<(u32, u64, u32)>>>;

fn recording_region() -> (IoFunctors, WriteLog) {
    let log: WriteLog = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    let io = IoFunctors::new(
        |offset, width| u64::from(offset) << 8 | u64::from(width),
        move |offset, value, width| sink.borrow_mut().push((offset, value, width)),
    );
    (io, log)
}

/// Tests that reads inside a region are forwarded to its handler.
#[test]
fn test_read_forwarded() {
    let mut mem = AddressSpaceMM::new();
    mem.add_io_region(0x2000, 4, IoFunctors::read_only(|_, _| 0x1234_5678))
        .unwrap();
    mem.write_mem(0x1000, 0xAA, 1);

    assert_eq!(mem.read_mem(0x2000, 4), 0x1234_5678);
    assert_eq!(mem.read_mem_const(0x2000, 4), 0x1234_5678);
    assert!(!mem.contains(0x2000));
    assert_eq!(mem.read_mem(0x1000, 1), 0xAA);
}

/// Tests that forwarded reads are cut to the requested width.
#[test]
fn test_forwarded_read_masked_to_width() {
    let mut mem = AddressSpaceMM::new();
    mem.add_io_region(0x2000, 8, IoFunctors::read_only(|_, _| u64::MAX))
        .unwrap();
    mem.add_io_region(0x100, SYSCON_SIZE, SysCon::new()).unwrap();

    assert_eq!(mem.read_mem(0x2000, 1), 0xFF);
    assert_eq!(mem.read_mem(0x2000, 2), 0xFFFF);
    assert_eq!(mem.read_mem_const(0x2000, 4), 0xFFFF_FFFF);
    assert_eq!(mem.read_mem_const(0x2000, 8), u64::MAX);
    assert_eq!(mem.read_mem_const(0x100, 4), 0xFFFF_FFFF);
    assert_eq!(mem.read_mem(0x100, 2), 0xFFFF);
}

/// Tests that handlers see offsets relative to the region base.
#[test]
fn test_offsets_relative_to_base() {
    let mut mem = AddressSpaceMM::new();
    let (io, log) = recording_region();
    mem.add_io_region(0x2000, 0x10, io).unwrap();

    mem.write_mem(0x2002, 0xAB, 1);
    mem.write_mem(0x200C, 0xCDEF, 2);
    assert_eq!(*log.borrow(), vec![(2, 0xAB, 1), (0xC, 0xCDEF, 2)]);
    assert_eq!(mem.read_mem(0x2004, 4), 0x404);
    assert!(mem.backing().is_empty());
}

/// Tests address classification.
#[test]
fn test_region_type() {
    let mut mem = AddressSpaceMM::new();
    mem.add_io_region(0x2000, 4, IoFunctors::read_only(|_, _| 0))
        .unwrap();
    assert_eq!(mem.region_type(0x2000), RegionType::Io);
    assert_eq!(mem.region_type(0x2003), RegionType::Io);
    assert_eq!(mem.region_type(0x2004), RegionType::Program);
    assert_eq!(mem.region_type(0x1000), RegionType::Program);
    assert_eq!(mem.region_type(0x1FFF), RegionType::Program);
}

/// Tests that overlapping regions are rejected.
#[test]
fn test_overlap_rejected() {
    let mut mem = AddressSpaceMM::new();
    mem.add_io_region(0x3000, 4, IoFunctors::read_only(|_, _| 0))
        .unwrap();

    let err = mem
        .add_io_region(0x3002, 4, IoFunctors::read_only(|_, _| 0))
        .unwrap_err();
    assert_eq!(err, ConfigError::OverlappingRegion { base: 0x3002, size: 4 });

    // Last address inside an existing region.
    assert!(mem
        .add_io_region(0x2FFE, 4, IoFunctors::read_only(|_, _| 0))
        .is_err());
    // Fully containing an existing region.
    assert!(mem
        .add_io_region(0x2F00, 0x200, IoFunctors::read_only(|_, _| 0))
        .is_err());
    // Adjacent regions are fine.
    mem.add_io_region(0x3004, 4, IoFunctors::read_only(|_, _| 0))
        .unwrap();
    mem.add_io_region(0x2FFC, 4, IoFunctors::read_only(|_, _| 0))
        .unwrap();
    assert_eq!(mem.io_regions().count(), 3);
}

/// Tests that empty and wrapping regions are rejected.
#[test]
fn test_degenerate_regions_rejected() {
    let mut mem = AddressSpaceMM::new();
    assert_eq!(
        mem.add_io_region(0x100, 0, IoFunctors::read_only(|_, _| 0))
            .unwrap_err(),
        ConfigError::EmptyRegion { base: 0x100 }
    );
    assert!(mem
        .add_io_region(0xFFFF_FFFE, 4, IoFunctors::read_only(|_, _| 0))
        .is_err());
    mem.add_io_region(0xFFFF_FFFC, 4, IoFunctors::read_only(|_, _| 7))
        .unwrap();
    assert_eq!(mem.read_mem(0xFFFF_FFFF, 1), 7);
}

/// Tests region removal.
#[test]
fn test_remove_region() {
    let mut mem = AddressSpaceMM::new();
    mem.add_io_region(0x3000, 4, IoFunctors::read_only(|_, _| 0x99))
        .unwrap();

    assert_eq!(
        mem.remove_io_region(0x3000, 8).err(),
        Some(ConfigError::UnknownRegion { base: 0x3000, size: 8 })
    );
    assert!(mem.remove_io_region(0x3001, 3).is_err());
    assert!(mem.remove_io_region(0x3000, 0).is_err());

    let Ok(handler) = mem.remove_io_region(0x3000, 4) else {
        panic!("region should be registered");
    };
    assert_eq!(handler.read(0, 4), 0x99);
    assert_eq!(mem.region_type(0x3000), RegionType::Program);
    assert_eq!(mem.read_mem(0x3000, 4), 0);
    assert!(mem.contains(0x3000));
}

/// Tests that an access starting in plain memory stays in plain memory.
#[test]
fn test_access_decoded_by_first_address() {
    let mut mem = AddressSpaceMM::new();
    let (io, log) = recording_region();
    mem.add_io_region(0x2000, 4, io).unwrap();

    mem.write_mem(0x1FFE, 0x1122_3344, 4);
    assert!(log.borrow().is_empty());
    assert_eq!(mem.backing().read_mem_const(0x2000, 2), 0x1122);
}

/// Tests that reset replays images through the peripheral windows.
#[test]
fn test_reset_replays_through_regions() {
    let mut mem = AddressSpaceMM::new();
    let console = Console::new();
    let output = console.output();
    mem.add_io_region(0x1000_0000, CONSOLE_SIZE, console).unwrap();

    mem.add_initialization_memory(0x1000_0000, b"X");
    mem.add_initialization_memory(0x0, &[1, 2]);
    mem.add_initialization_memory(0x1, &[7]);
    mem.reset();

    assert_eq!(*output.borrow(), b"X".to_vec());
    assert_eq!(mem.read_mem_const(0x0, 2), 0x0701);
    assert!(!mem.contains(0x1000_0000));
}

/// Tests the console peripheral.
#[test]
fn test_console() {
    let mut mem = AddressSpaceMM::new();
    let console = Console::new();
    let output = console.output();
    mem.add_io_region(0x1000_0000, CONSOLE_SIZE, console).unwrap();

    for &b in b"ok\n" {
        mem.write_mem(0x1000_0000, u64::from(b), 4);
    }
    assert_eq!(output.borrow().as_slice(), b"ok\n");
    assert_eq!(mem.read_mem(0x1000_0000 + CONSOLE_COUNT, 4), 3);
}

/// Tests the system controller exit codes.
#[test]
fn test_syscon_exit() {
    for (command, code) in [(0x5555, 0), (0x7777, 0), (0x3333, 1)] {
        let mut mem = AddressSpaceMM::new();
        let syscon = SysCon::new();
        let signal = syscon.exit_signal();
        mem.add_io_region(0x10_0000, SYSCON_SIZE, syscon).unwrap();
        assert_eq!(SysCon::exit_code(&signal), None);

        mem.write_mem(0x10_0004, command, 4);
        assert_eq!(SysCon::exit_code(&signal), None);

        mem.write_mem(0x10_0000, 0x1_0000 | command, 4);
        assert_eq!(SysCon::exit_code(&signal), None);

        mem.write_mem(0x10_0000, command, 4);
        assert_eq!(SysCon::exit_code(&signal), Some(code));
        assert_eq!(mem.read_mem(0x10_0000, 4), code);
    }
}

/// Tests region lookup.
#[test]
fn test_find_region() {
    let mut mem = AddressSpaceMM::new();
    mem.add_io_region(0x10_0000, SYSCON_SIZE, SysCon::new()).unwrap();
    mem.add_io_region(0x1000, CONSOLE_SIZE, Console::new()).unwrap();

    let region = mem.find_region(0x10_0008).unwrap();
    assert_eq!(region.base(), 0x10_0000);
    assert_eq!(region.size(), SYSCON_SIZE);
    assert_eq!(region.handler().name(), "SysCon");
    assert!(mem.find_region(0x10_0010).is_none());

    let names: Vec<_> = mem.io_regions().map(|r| r.handler().name().to_string()).collect();
    assert_eq!(names, vec!["Console", "SysCon"]);
}
