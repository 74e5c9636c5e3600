//! Character output peripheral.
//!
//! Bytes written to the data register are appended to a shared buffer; a
//! completed line is also logged.

use crate::soc::IoHandler;
use std::cell::RefCell;
use std::rc::Rc;

/// Size of the Console register window in bytes.
pub const CONSOLE_SIZE: u32 = 0x8;

/// Data register: writes append the low byte.
pub const CONSOLE_DATA: u32 = 0x0;
/// Count register: number of bytes written so far.
pub const CONSOLE_COUNT: u32 = 0x4;

pub struct Console {
    output: Rc<RefCell<Vec<u8>>>,
    line: Vec<u8>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            output: Rc::new(RefCell::new(Vec::new())),
            line: Vec::new(),
        }
    }

    /// Handle to everything written so far.
    pub fn output(&self) -> Rc<RefCell<Vec<u8>>> {
        self.output.clone()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl IoHandler for Console {
    fn name(&self) -> &str {
        "Console"
    }

    fn read(&self, offset: u32, _width: u32) -> u64 {
        match offset {
            CONSOLE_COUNT => self.output.borrow().len() as u64,
            _ => 0,
        }
    }

    fn write(&mut self, offset: u32, value: u64, _width: u32) {
        if offset != CONSOLE_DATA {
            tracing::warn!("Console: write to read-only register {:#x}", offset);
            return;
        }
        let byte = (value & 0xff) as u8;
        self.output.borrow_mut().push(byte);
        if byte == b'\n' {
            tracing::info!(target: "console", "{}", String::from_utf8_lossy(&self.line));
            self.line.clear();
        } else {
            self.line.push(byte);
        }
    }
}
