//! Example memory-mapped peripherals.
//!
//! These implement [`IoHandler`](crate::soc::IoHandler) and are mapped into
//! an [`AddressSpaceMM`](crate::soc::AddressSpaceMM) with `add_io_region`.

pub mod console;
pub mod syscon;

pub use console::Console;
pub use syscon::SysCon;
