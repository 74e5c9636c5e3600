use crate::common::mask;
use crate::soc::IoHandler;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Size of the SysCon register window in bytes.
pub const SYSCON_SIZE: u32 = 0x10;

const POWEROFF: u32 = 0x5555;
const FAIL: u32 = 0x3333;
const RESET: u32 = 0x7777;

/// No exit has been requested.
const NO_EXIT: u64 = u64::MAX;

/// SysCon (System Controller)
/// Lets a simulated program request the end of the simulation by writing a
/// status word to register 0. Based on the SiFive Test device interface.
pub struct SysCon {
    exit_signal: Arc<AtomicU64>,
}

impl SysCon {
    pub fn new() -> Self {
        Self {
            exit_signal: Arc::new(AtomicU64::new(NO_EXIT)),
        }
    }

    /// Shared flag holding the requested exit code, read by the harness
    /// after the peripheral has been moved into an address space.
    pub fn exit_signal(&self) -> Arc<AtomicU64> {
        self.exit_signal.clone()
    }

    /// Decodes an exit flag: `Some(code)` once an exit was requested.
    pub fn exit_code(signal: &AtomicU64) -> Option<u64> {
        match signal.load(Ordering::Relaxed) {
            NO_EXIT => None,
            code => Some(code),
        }
    }
}

impl Default for SysCon {
    fn default() -> Self {
        Self::new()
    }
}

impl IoHandler for SysCon {
    fn name(&self) -> &str {
        "SysCon"
    }

    // Register 0: last requested exit code (all ones while running)
    fn read(&self, offset: u32, width: u32) -> u64 {
        if offset == 0 {
            self.exit_signal.load(Ordering::Relaxed) & mask(width.min(8) * 8)
        } else {
            0
        }
    }

    fn write(&mut self, offset: u32, value: u64, _width: u32) {
        if offset != 0 {
            tracing::warn!("SysCon: write to unmapped register {:#x}", offset);
            return;
        }
        match value as u32 {
            POWEROFF => {
                tracing::info!("SysCon: poweroff signal received");
                self.exit_signal.store(0, Ordering::Relaxed)
            }
            RESET => {
                tracing::info!("SysCon: reset signal received (simulated as exit)");
                self.exit_signal.store(0, Ordering::Relaxed)
            }
            FAIL => {
                tracing::info!("SysCon: failure signal received");
                self.exit_signal.store(1, Ordering::Relaxed)
            }
            _ => {}
        }
    }
}
