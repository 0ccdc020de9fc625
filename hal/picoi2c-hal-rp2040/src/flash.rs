//! Flash chip identification
//!
//! Every QSPI flash on an RP2040 board carries a 64-bit unique ID; the
//! firmware turns it into the USB serial number.

use embassy_rp::flash::{Blocking, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

/// Flash size on a Raspberry Pi Pico
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Length of the flash unique ID
pub const UNIQUE_ID_LEN: usize = 8;

/// Read the flash unique ID
///
/// Returns `None` if the flash did not answer the command.
pub fn read_unique_id(flash: Peri<'_, FLASH>) -> Option<[u8; UNIQUE_ID_LEN]> {
    let mut flash = Flash::<_, Blocking, FLASH_SIZE>::new_blocking(flash);
    let mut id = [0u8; UNIQUE_ID_LEN];
    flash.blocking_unique_id(&mut id).ok()?;
    Some(id)
}
