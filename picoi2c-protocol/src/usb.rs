//! USB device identity
//!
//! The adapter reuses the i2c-tiny-usb vendor and product IDs so the stock
//! Linux driver binds to it without changes.

/// Vendor ID
pub const USB_VID: u16 = 0x0403;
/// Product ID
pub const USB_PID: u16 = 0xC631;
/// Device release (`bcdDevice`)
pub const USB_DEVICE_RELEASE: u16 = 0x0205;

/// Vendor-specific class code, used for the device and its interface
pub const USB_CLASS_VENDOR: u8 = 0xFF;

/// Bus power request in mA
pub const USB_MAX_POWER_MA: u16 = 100;

/// Control endpoint packet size
pub const USB_EP0_PACKET_SIZE: u8 = 64;

pub const MANUFACTURER: &str = "dqsoft.com.br";
pub const PRODUCT: &str = "i2c-pico-usb";

/// Serial number used when the flash unique ID cannot be read
pub const FALLBACK_SERIAL: &str = "0000000000000000";

/// Length of the hex serial string built from an 8-byte unique ID
pub const SERIAL_LEN: usize = 16;

/// Format a unique board ID as an upper-case hex serial string
pub fn serial_from_unique_id(id: &[u8; 8], out: &mut [u8; SERIAL_LEN]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for (i, byte) in id.iter().enumerate() {
        out[2 * i] = HEX[(byte >> 4) as usize];
        out[2 * i + 1] = HEX[(byte & 0x0F) as usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_from_unique_id() {
        let mut out = [0u8; SERIAL_LEN];
        serial_from_unique_id(&[0xE6, 0x60, 0x38, 0xB7, 0x13, 0x2A, 0x4B, 0x2F], &mut out);
        assert_eq!(&out, b"E66038B7132A4B2F");
    }
}
