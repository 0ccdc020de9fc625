//! Vendor control request handler
//!
//! The adapter has no endpoints besides EP0. Every I2C operation arrives as
//! a vendor control transfer: reads as IN transfers, writes as OUT
//! transfers with the payload in the data stage. embassy-usb collects the
//! whole OUT data stage before calling the handler, and hands it a buffer
//! large enough for the whole IN reply, so one callback serves one request.
//!
//! Any error fails the transfer (STALL); the host reads the address status
//! with a later GET_STATUS request.

use defmt::*;
use embassy_usb::control::{InResponse, OutResponse, Request, RequestType};
use embassy_usb::Handler;

use picoi2c_core::state::{LinkEvent, LinkState};
use picoi2c_core::{Bridge, BridgeError, I2cMaster, Session};
use picoi2c_protocol::{Command, ControlRequest};

use crate::channels::USB_CONFIGURED;

/// embassy-usb handler bridging vendor requests onto the bus
pub struct I2cControlHandler<B> {
    bridge: Bridge<B>,
    session: Session,
    link: LinkState,
}

impl<B: I2cMaster> I2cControlHandler<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bridge: Bridge::new(bus),
            session: Session::new(),
            link: LinkState::default(),
        }
    }

    /// Follow the USB link and tell the LED task when configuration changes
    fn link_event(&mut self, event: LinkEvent) {
        let next = self.link.transition(event);
        if next != self.link {
            info!("USB link {} -> {}", self.link, next);
        }
        if next.is_configured() != self.link.is_configured() {
            USB_CONFIGURED.signal(next.is_configured());
        }
        self.link = next;
    }
}

impl<B: I2cMaster> Handler for I2cControlHandler<B> {
    fn enabled(&mut self, enabled: bool) {
        self.link_event(LinkEvent::Enabled(enabled));
    }

    fn reset(&mut self) {
        self.link_event(LinkEvent::Reset);
    }

    fn configured(&mut self, configured: bool) {
        self.link_event(LinkEvent::Configured(configured));
    }

    fn control_out(&mut self, req: Request, data: &[u8]) -> Option<OutResponse> {
        let request = vendor_request(&req)?;

        let result = self.bridge.serve_out(&mut self.session, &request, data);
        log_address(&request, &result);
        match result {
            Ok(()) => Some(OutResponse::Accepted),
            Err(e) => {
                warn!("OUT request {=u8} rejected: {}", request.request, e);
                Some(OutResponse::Rejected)
            }
        }
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        let request = vendor_request(&req)?;

        let result = self.bridge.serve_in(&mut self.session, &request, buf);
        log_address(&request, &result);
        match result {
            Ok(len) => Some(InResponse::Accepted(&buf[..len])),
            Err(e) => {
                warn!("IN request {=u8} rejected: {}", request.request, e);
                Some(InResponse::Rejected)
            }
        }
    }
}

/// Vendor requests are ours; anything else is left to embassy-usb
fn vendor_request(req: &Request) -> Option<ControlRequest> {
    if req.request_type != RequestType::Vendor {
        return None;
    }
    let request = ControlRequest::new(req.request, req.value, req.index, req.length);
    debug!(
        "vendor request {=u8} value={=u16:#x} index={=u16:#x} length={=u16}",
        request.request, request.value, request.index, request.length
    );
    Some(request)
}

fn log_address<T>(request: &ControlRequest, result: &Result<T, BridgeError>) {
    if !matches!(request.command(), Ok(Command::I2cIo(_))) {
        return;
    }
    let address = request.index & 0x7F;
    match result {
        Err(BridgeError::AddressNack) => debug!("address {=u16:#04x} NAK", address),
        // Refused before the address went out
        Err(BridgeError::Protocol(_) | BridgeError::ChunkTooLarge) => {}
        _ => debug!("address {=u16:#04x} ACK", address),
    }
}
