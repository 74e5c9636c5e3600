//! Integration tests for the primitive component library.

use std::cell::RefCell;
use std::rc::Rc;

use rtl_sim::components::{
    Constant, GateOp, LogicGate, Memory, Multiplexer, Not, RegisterFile, Rom,
};
use rtl_sim::common::{RuntimeError, SimError};
use rtl_sim::core::{ComponentId, Design};
use rtl_sim::soc::{AddressSpace, SharedAddressSpace};

/// Builds `op(a, b)` over constant inputs and returns the resolved output.
fn gate(op: GateOp, width: u32, a: u64, b: u64) -> u64 {
    let mut design = Design::new("gate");
    let ca = design.add_component("a", Constant::new(width, a)).unwrap();
    let cb = design.add_component("b", Constant::new(width, b)).unwrap();
    let g = design.add_component("g", LogicGate::new(op, width, 2)).unwrap();
    design.wire(ca, "out", g, "in0").unwrap();
    design.wire(cb, "out", g, "in1").unwrap();
    design.verify_and_initialize().unwrap();
    design.value(design.output(g, "out").unwrap())
}

/// Drives every input of `target` named in `values` from a constant.
fn drive(design: &mut Design, target: ComponentId, values: &[(&str, u32, u64)]) {
    for &(port, width, value) in values {
        let name = format!("{}_{port}", design.component(target).name());
        let c = design
            .add_component(name, Constant::new(width, value))
            .unwrap();
        design.wire(c, "out", target, port).unwrap();
    }
}

/// Tests the two-input gates.
#[test]
fn test_gates() {
    assert_eq!(gate(GateOp::And, 8, 0xF0, 0x3C), 0x30);
    assert_eq!(gate(GateOp::Or, 8, 0xF0, 0x0F), 0xFF);
    assert_eq!(gate(GateOp::Xor, 8, 0xF0, 0xFF), 0x0F);
    assert_eq!(gate(GateOp::Nand, 1, 1, 1), 0);
    assert_eq!(gate(GateOp::Nor, 1, 0, 0), 1);
    assert_eq!(gate(GateOp::Xnor, 4, 0b1010, 0b1001), 0b1100);
}

/// Tests a gate with more than two inputs.
#[test]
fn test_wide_or_gate() {
    let mut design = Design::new("or3");
    let g = design.add_component("g", LogicGate::or(4, 3)).unwrap();
    drive(&mut design, g, &[("in0", 4, 0b0001), ("in1", 4, 0b0100), ("in2", 4, 0b1000)]);
    design.verify_and_initialize().unwrap();
    assert_eq!(design.value(design.output(g, "out").unwrap()), 0b1101);
}

/// Tests the inverter masks to its width.
#[test]
fn test_not() {
    let mut design = Design::new("not");
    let n = design.add_component("n", Not::new(12)).unwrap();
    drive(&mut design, n, &[("in", 12, 0x0F0)]);
    design.verify_and_initialize().unwrap();
    assert_eq!(design.value(design.output(n, "out").unwrap()), 0xF0F);
}

/// Tests multiplexer selection, including an out-of-range select.
#[test]
fn test_multiplexer() {
    for (select, expected) in [(0, 10), (2, 30), (3, 0)] {
        let mut design = Design::new("mux");
        let mux = Multiplexer::new(8, 3);
        assert_eq!(mux.select_width(), 2);
        let m = design.add_component("m", mux).unwrap();
        drive(
            &mut design,
            m,
            &[("in0", 8, 10), ("in1", 8, 20), ("in2", 8, 30), ("select", 2, select)],
        );
        design.verify_and_initialize().unwrap();
        assert_eq!(design.value(design.output(m, "out").unwrap()), expected);
    }
}

/// Tests that a register-file write lands on the clock edge.
#[test]
fn test_register_file_write() {
    let mut design = Design::new("rf");
    let rf = design.add_component("rf", RegisterFile::new(4, 8)).unwrap();
    drive(
        &mut design,
        rf,
        &[
            ("raddr1", 2, 2),
            ("raddr2", 2, 1),
            ("waddr", 2, 2),
            ("wdata", 8, 0xAB),
            ("wr_en", 1, 1),
        ],
    );
    design.verify_and_initialize().unwrap();
    let rdata1 = design.output(rf, "rdata1").unwrap();
    let rdata2 = design.output(rf, "rdata2").unwrap();
    assert_eq!(design.value(rdata1), 0);

    design.clock().unwrap();
    assert_eq!(design.value(rdata1), 0xAB);
    assert_eq!(design.value(rdata2), 0);

    design.reset().unwrap();
    assert_eq!(design.value(rdata1), 0);
}

/// Tests that register 0 stays zero when hardwired.
#[test]
fn test_register_file_zero_register() {
    let mut design = Design::new("rf");
    let rf = design
        .add_component("rf", RegisterFile::new(32, 64).with_zero_register())
        .unwrap();
    drive(
        &mut design,
        rf,
        &[
            ("raddr1", 5, 0),
            ("raddr2", 5, 0),
            ("waddr", 5, 0),
            ("wdata", 64, u64::MAX),
            ("wr_en", 1, 1),
        ],
    );
    design.verify_and_initialize().unwrap();
    design.clock().unwrap();
    assert_eq!(design.value(design.output(rf, "rdata1").unwrap()), 0);
}

/// Tests that register-file writes are skipped while write enable is low.
#[test]
fn test_register_file_write_disabled() {
    let mut design = Design::new("rf");
    let rf = design.add_component("rf", RegisterFile::new(2, 16)).unwrap();
    drive(
        &mut design,
        rf,
        &[
            ("raddr1", 1, 1),
            ("raddr2", 1, 0),
            ("waddr", 1, 1),
            ("wdata", 16, 0x1234),
            ("wr_en", 1, 0),
        ],
    );
    design.verify_and_initialize().unwrap();
    design.clock().unwrap();
    assert_eq!(design.value(design.output(rf, "rdata1").unwrap()), 0);
}

/// Tests the memory component: asynchronous read, synchronous write.
#[test]
fn test_memory_write_then_read() {
    let space = Rc::new(RefCell::new(AddressSpace::new()));
    let shared: SharedAddressSpace = space.clone();

    let mut design = Design::new("mem");
    let mem = design
        .add_component("mem", Memory::new(shared, 32, 32))
        .unwrap();
    drive(
        &mut design,
        mem,
        &[("addr", 32, 0x100), ("data_in", 32, 0xCAFE_BABE), ("wr_en", 1, 1)],
    );
    design.verify_and_initialize().unwrap();
    let data_out = design.output(mem, "data_out").unwrap();
    assert_eq!(design.value(data_out), 0);

    design.clock().unwrap();
    assert_eq!(design.value(data_out), 0xCAFE_BABE);
    assert_eq!(space.borrow().read_mem_const(0x100, 4), 0xCAFE_BABE);
    assert!(design.component(mem).is_sequential());
}

/// Tests that memories sharing one address space register it once and that
/// reset reloads its initialization memories.
#[test]
fn test_shared_space_reset() {
    let space = Rc::new(RefCell::new(AddressSpace::new()));
    space
        .borrow_mut()
        .add_initialization_words(0x40, &[0x1122_3344]);
    let shared: SharedAddressSpace = space.clone();

    let mut design = Design::new("rom");
    let rom = design
        .add_component("rom", Rom::new(shared.clone(), 8, 32))
        .unwrap();
    let ram = design
        .add_component("ram", Memory::new(shared, 8, 8))
        .unwrap();
    drive(&mut design, rom, &[("addr", 8, 0x40)]);
    drive(
        &mut design,
        ram,
        &[("addr", 8, 0x41), ("data_in", 8, 0xEE), ("wr_en", 1, 1)],
    );
    design.verify_and_initialize().unwrap();
    assert_eq!(design.address_spaces().len(), 1);

    // Initialization does not load images.
    let rom_out = design.output(rom, "data_out").unwrap();
    assert_eq!(design.value(rom_out), 0);

    design.reset().unwrap();
    assert_eq!(design.value(rom_out), 0x1122_3344);

    design.clock().unwrap();
    assert_eq!(design.value(rom_out), 0x1122_EE44);

    design.reset().unwrap();
    assert_eq!(design.value(rom_out), 0x1122_3344);
}

/// Tests that an address space owned by no component is registered once and
/// reloaded by reset.
#[test]
fn test_registered_space_reset() {
    let space = Rc::new(RefCell::new(AddressSpace::new()));
    space
        .borrow_mut()
        .add_initialization_memory(0x100, &[0xDE, 0xAD]);
    let shared: SharedAddressSpace = space.clone();

    let mut design = Design::new("side");
    design.add_component("c", Constant::new(8, 1)).unwrap();
    design.register_address_space(shared.clone()).unwrap();
    design.register_address_space(shared.clone()).unwrap();
    assert_eq!(design.address_spaces().len(), 1);

    design.verify_and_initialize().unwrap();
    assert_eq!(design.address_spaces().len(), 1);
    assert!(space.borrow().is_empty());

    space.borrow_mut().write_mem(0x100, 0x11, 1);
    design.reset().unwrap();
    assert_eq!(space.borrow().read_mem_const(0x100, 2), 0xADDE);

    let err = design.register_address_space(shared).unwrap_err();
    assert!(matches!(
        err,
        SimError::Runtime(RuntimeError::AlreadyInitialized(_))
    ));
}
