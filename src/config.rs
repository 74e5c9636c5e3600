//! Harness Configuration.
//!
//! The simulator binary is driven by a TOML file selecting a reference
//! design and how long to run it. Every field has a default, so an empty
//! file is a valid configuration.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::common::{Result, SimError};

const DEFAULT_CYCLES: u64 = 16;
const DEFAULT_WIDTH: u32 = 32;
const DEFAULT_INCREMENT: u64 = 4;

const SYSCON_BASE: u32 = 0x0010_0000;
const CONSOLE_BASE: u32 = 0x1000_0000;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub design: DesignConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| SimError::Settings(format!("{}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SimError::Settings(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_cycles")]
    pub cycles: u64,

    /// Print a snapshot of the watched ports after every cycle.
    #[serde(default)]
    pub trace: bool,

    /// Emit snapshots as JSON lines instead of text.
    #[serde(default)]
    pub json: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            trace: false,
            json: false,
        }
    }
}

/// Reference circuits the harness can build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignKind {
    #[default]
    Accumulator,
    AndGate,
    MemoryCounter,
}

#[derive(Debug, Deserialize)]
pub struct DesignConfig {
    #[serde(default)]
    pub kind: DesignKind,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_increment")]
    pub increment: u64,

    /// Port paths to print; all ports when empty.
    #[serde(default)]
    pub watch: Vec<String>,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            kind: DesignKind::default(),
            width: DEFAULT_WIDTH,
            increment: DEFAULT_INCREMENT,
            watch: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MemoryConfig {
    /// Raw binary preloaded into the memory of the memory-backed designs.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default = "default_load_addr")]
    pub load_addr: String,

    #[serde(default = "default_syscon_base")]
    pub syscon_base: String,

    #[serde(default = "default_console_base")]
    pub console_base: String,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            image: None,
            load_addr: default_load_addr(),
            syscon_base: default_syscon_base(),
            console_base: default_console_base(),
        }
    }
}

impl MemoryConfig {
    pub fn load_addr_val(&self) -> u32 {
        parse_hex(&self.load_addr, 0)
    }

    pub fn syscon_base_val(&self) -> u32 {
        parse_hex(&self.syscon_base, SYSCON_BASE)
    }

    pub fn console_base_val(&self) -> u32 {
        parse_hex(&self.console_base, CONSOLE_BASE)
    }
}

fn parse_hex(s: &str, default: u32) -> u32 {
    let s = s.trim_start_matches("0x");
    u32::from_str_radix(s, 16).unwrap_or(default)
}

fn default_cycles() -> u64 {
    DEFAULT_CYCLES
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_increment() -> u64 {
    DEFAULT_INCREMENT
}

fn default_load_addr() -> String {
    format!("{:#x}", 0)
}

fn default_syscon_base() -> String {
    format!("{:#x}", SYSCON_BASE)
}

fn default_console_base() -> String {
    format!("{:#x}", CONSOLE_BASE)
}
