//! picoi2c - USB to I2C Bus Adapter Firmware
//!
//! Main firmware binary for RP2040 boards. Presents an i2c-tiny-usb
//! compatible vendor device and drives the I2C bus by bit-banging two
//! GPIO pins, so the host sees a standard `i2c-N` adapter.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{FLASH, USB};
use embassy_rp::usb::{Driver, InterruptHandler};
use embassy_rp::Peri;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use picoi2c_drivers::BitBangI2c;
use picoi2c_hal_rp2040::{flash, BusPin, EmbassyTimer};
use picoi2c_protocol::usb::{
    serial_from_unique_id, FALLBACK_SERIAL, MANUFACTURER, PRODUCT, SERIAL_LEN, USB_CLASS_VENDOR,
    USB_DEVICE_RELEASE, USB_EP0_PACKET_SIZE, USB_MAX_POWER_MA, USB_PID, USB_VID,
};

use crate::bus::MaskedConditions;
use crate::usb::I2cControlHandler;

#[macro_use]
mod config;

mod bus;
mod channels;
mod tasks;
mod usb;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => InterruptHandler<USB>;
});

/// Control transfer buffer; bounds the largest single I2C read or write
const CONTROL_BUF_SIZE: usize = 1024;

/// Bus driver as wired on this board
type AdapterBus = MaskedConditions<BitBangI2c<BusPin<'static>, BusPin<'static>, EmbassyTimer>>;

// Static cells for USB buffers and the handler (must live forever)
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; CONTROL_BUF_SIZE]> = StaticCell::new();
static SERIAL: StaticCell<[u8; SERIAL_LEN]> = StaticCell::new();
static HANDLER: StaticCell<I2cControlHandler<AdapterBus>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("picoi2c firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let board = config::BOARD;
    info!(
        "Board: SDA=GPIO{} SCL=GPIO{} LED={}",
        board.sda.pin, board.scl.pin, board.led
    );

    // Bus lines start released
    let (sda, scl) = board_pins!(p);
    let sda = BusPin::new(sda, board.sda.pull_up);
    let scl = BusPin::new(scl, board.scl.pull_up);

    let i2c = BitBangI2c::new(sda, scl, EmbassyTimer, board.clock_period_us)
        .with_stretch_timeout_us(board.stretch_timeout_us());
    let timing = i2c.timing();
    info!(
        "I2C clock period {}us: {}us before / {}us after each transition",
        board.clock_period_us, timing.before_us, timing.after_us
    );

    if let Some(led) = board_led!(p) {
        let led = Output::new(led, Level::Low);
        spawner.spawn(tasks::led_task(led)).unwrap();
    }

    let serial = serial_number(p.FLASH);
    info!("USB serial number: {}", serial);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some(MANUFACTURER);
    usb_config.product = Some(PRODUCT);
    usb_config.serial_number = Some(serial);
    usb_config.device_release = USB_DEVICE_RELEASE;
    usb_config.device_class = USB_CLASS_VENDOR;
    usb_config.device_sub_class = 0;
    usb_config.device_protocol = 0;
    usb_config.composite_with_iads = false;
    usb_config.max_power = USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = USB_EP0_PACKET_SIZE;

    let driver = Driver::new(p.USB, Irqs);
    let mut builder = Builder::new(
        driver,
        usb_config,
        CONFIG_DESCRIPTOR.init([0u8; 256]),
        BOS_DESCRIPTOR.init([0u8; 256]),
        &mut [],
        CONTROL_BUF.init([0u8; CONTROL_BUF_SIZE]),
    );

    let handler = HANDLER.init(I2cControlHandler::new(MaskedConditions::new(i2c)));
    builder.handler(handler);

    // One vendor interface, no endpoints: everything goes over EP0
    {
        let mut function = builder.function(USB_CLASS_VENDOR, 0, 0);
        let mut interface = function.interface();
        interface.alt_setting(USB_CLASS_VENDOR, 0, 0, None);
    }

    let mut usb = builder.build();
    info!("USB device ready");

    usb.run().await
}

/// USB serial number from the flash unique ID, as 16 hex digits
fn serial_number(flash: Peri<'static, FLASH>) -> &'static str {
    let Some(id) = flash::read_unique_id(flash) else {
        warn!("Flash unique ID unavailable, using fallback serial");
        return FALLBACK_SERIAL;
    };

    let buf = SERIAL.init([0u8; SERIAL_LEN]);
    serial_from_unique_id(&id, buf);
    let buf: &'static [u8] = buf;
    core::str::from_utf8(buf).unwrap_or(FALLBACK_SERIAL)
}
