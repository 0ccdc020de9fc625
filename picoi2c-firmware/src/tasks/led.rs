//! Status LED task
//!
//! Lights the LED while the host has the adapter configured.

use defmt::*;
use embassy_rp::gpio::{Level, Output};

use crate::channels::USB_CONFIGURED;

#[embassy_executor::task]
pub async fn led_task(mut led: Output<'static>) {
    info!("LED task started");

    loop {
        let configured = USB_CONFIGURED.wait().await;
        led.set_level(if configured { Level::High } else { Level::Low });
    }
}
