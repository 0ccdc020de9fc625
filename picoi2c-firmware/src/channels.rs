//! Inter-task communication channels
//!
//! Defines the static signals shared between the USB handler and Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

/// USB configuration state (true once the host has selected a configuration)
pub static USB_CONFIGURED: Signal<CriticalSectionRawMutex, bool> = Signal::new();
