//! Integration tests for the reference designs and port tracing.

use rtl_sim::config::{Config, DesignKind, MemoryConfig};
use rtl_sim::sim::{designs, Snapshot};

/// Tests that the memory counter prints its greeting and powers off.
#[test]
fn test_memory_counter_greeting() {
    let mut bench = designs::memory_counter(&MemoryConfig::default(), None).unwrap();
    bench.design.verify_and_initialize().unwrap();

    let greeting = "Hello from rtl-sim\n";
    for _ in 0..greeting.len() {
        bench.design.clock().unwrap();
        assert_eq!(bench.exit_code(), None);
    }
    assert_eq!(bench.console_text(), greeting);

    bench.design.clock().unwrap();
    assert_eq!(bench.exit_code(), Some(0));
    assert_eq!(bench.design.address_spaces().len(), 1);
}

/// Tests the memory counter running a custom image at a load address.
#[test]
fn test_memory_counter_image() {
    let words: [u32; 3] = [u32::from(b'o'), u32::from(b'k'), 0xff00_3333];
    let image: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    let memory = MemoryConfig {
        load_addr: "0x400".to_string(),
        ..MemoryConfig::default()
    };

    let mut bench = designs::memory_counter(&memory, Some(image)).unwrap();
    bench.design.verify_and_initialize().unwrap();
    let pc = bench.design.find_port("pc.out").unwrap();
    assert_eq!(bench.design.value(pc), 0x400);

    for _ in 0..3 {
        bench.design.clock().unwrap();
    }
    assert_eq!(bench.console_text(), "ok");
    assert_eq!(bench.exit_code(), Some(1));
    assert_eq!(bench.design.value(pc), 0x40C);
}

/// Tests that the harness builds the configured design.
#[test]
fn test_build_from_config() {
    let mut config = Config::default();
    config.design.kind = DesignKind::AndGate;
    let bench = designs::build(&config, None).unwrap();
    assert_eq!(bench.design.name(), "and_gate");
    assert!(bench.exit_signal.is_none());
    assert_eq!(bench.exit_code(), None);
    assert_eq!(bench.console_text(), "");
}

/// Tests snapshots of watched ports.
#[test]
fn test_snapshot_watch() {
    let mut design = designs::accumulator(32, 4).unwrap();
    design.verify_and_initialize().unwrap();
    design.clock().unwrap();
    design.clock().unwrap();

    let watch = vec!["acc.out".to_string(), "missing.out".to_string()];
    let snapshot = Snapshot::capture(&design, &watch);
    assert_eq!(snapshot.cycle, 2);
    assert_eq!(snapshot.ports.len(), 1);
    assert_eq!(snapshot.ports["acc.out"], 8);
    assert_eq!(
        snapshot.to_json().unwrap(),
        r#"{"cycle":2,"ports":{"acc.out":8}}"#
    );
    assert_eq!(snapshot.to_string(), "cycle      2: acc.out=0x8");
}

/// Tests that an empty watch list captures every port.
#[test]
fn test_snapshot_all_ports() {
    let mut design = designs::accumulator(8, 1).unwrap();
    design.verify_and_initialize().unwrap();

    let snapshot = Snapshot::capture(&design, &[]);
    assert_eq!(snapshot.ports.len(), design.ports().len());
    assert_eq!(snapshot.ports["adder.out"], 1);
    assert_eq!(snapshot.ports["step.out"], 1);
}
