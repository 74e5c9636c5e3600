//! Tests for harness configuration parsing.

use std::io::Write;

use rtl_sim::common::SimError;
use rtl_sim::config::{Config, DesignKind};

/// Tests that an empty file yields every default.
#[test]
fn test_defaults() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.general.cycles, 16);
    assert!(!config.general.trace);
    assert!(!config.general.json);
    assert_eq!(config.design.kind, DesignKind::Accumulator);
    assert_eq!(config.design.width, 32);
    assert_eq!(config.design.increment, 4);
    assert!(config.design.watch.is_empty());
    assert!(config.memory.image.is_none());
    assert_eq!(config.memory.load_addr_val(), 0);
    assert_eq!(config.memory.syscon_base_val(), 0x10_0000);
    assert_eq!(config.memory.console_base_val(), 0x1000_0000);
}

/// Tests a fully specified configuration.
#[test]
fn test_full_config() {
    let config = Config::parse(
        r#"
        [general]
        cycles = 100
        trace = true
        json = true

        [design]
        kind = "memory_counter"
        width = 8
        increment = 1
        watch = ["pc.out", "fetch.data_out"]

        [memory]
        image = "program.bin"
        load_addr = "0x80"
        syscon_base = "200000"
        console_base = "0x3000"
        "#,
    )
    .unwrap();

    assert_eq!(config.general.cycles, 100);
    assert!(config.general.trace && config.general.json);
    assert_eq!(config.design.kind, DesignKind::MemoryCounter);
    assert_eq!(config.design.watch, vec!["pc.out", "fetch.data_out"]);
    assert_eq!(config.memory.image.as_deref(), Some("program.bin"));
    assert_eq!(config.memory.load_addr_val(), 0x80);
    assert_eq!(config.memory.syscon_base_val(), 0x20_0000);
    assert_eq!(config.memory.console_base_val(), 0x3000);
}

/// Tests that malformed hex strings fall back to the defaults.
#[test]
fn test_bad_hex_falls_back() {
    let config = Config::parse(
        r#"
        [memory]
        load_addr = "0xzz"
        console_base = ""
        "#,
    )
    .unwrap();
    assert_eq!(config.memory.load_addr_val(), 0);
    assert_eq!(config.memory.console_base_val(), 0x1000_0000);
}

/// Tests that invalid TOML and unknown design kinds are rejected.
#[test]
fn test_invalid_config() {
    assert!(matches!(
        Config::parse("[general\ncycles = 1"),
        Err(SimError::Settings(_))
    ));
    assert!(matches!(
        Config::parse("[design]\nkind = \"cpu\""),
        Err(SimError::Settings(_))
    ));
}

/// Tests loading from a file.
#[test]
fn test_load_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[design]\nkind = \"and_gate\"").unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.design.kind, DesignKind::AndGate);
    assert!(matches!(
        Config::load("/nonexistent/rtl-sim.toml"),
        Err(SimError::Settings(_))
    ));
}

/// Tests that the shipped configuration parses.
#[test]
fn test_shipped_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/default.toml");
    let config = Config::load(path).unwrap();
    assert_eq!(config.design.kind, DesignKind::Accumulator);
    assert_eq!(config.design.watch, vec!["acc.out", "adder.out"]);
}
