//! Simulated open-drain bus for driver tests
//!
//! A [`Wire`] resolves the two lines from what the master pins drive and
//! what a simulated target drives, detects start/stop conditions and clock
//! edges, and feeds them to a bit-level target model. A shared microsecond
//! counter stands in for the hardware timer.

use core::cell::RefCell;

use heapless::Vec;
use picoi2c_hal::{FlexPin, PinDirection, Timer};

use super::Line;

/// Bus activity observed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Start,
    Stop,
    /// SCL rising edge, with the SDA level at that moment
    Clock { sda: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Not addressed; ignore clocks until the next start
    Idle,
    /// Shifting in the address byte
    Address,
    /// Shifting in a data byte
    Receive,
    /// Holding SDA low for our acknowledge
    AckOut { read: bool },
    /// Shifting out a data byte
    Transmit,
    /// Waiting for the master's acknowledge
    MasterAck,
}

/// Memory-like target with a one-byte register pointer
///
/// The first byte written after the address sets the pointer; further
/// bytes are stored and advance it. Reads return bytes from the pointer.
pub struct Target {
    pub address: u8,
    pub memory: [u8; 256],
    pub pointer: u8,
    /// Refuse the Nth data byte written (0-based, counted per transfer)
    pub nack_data_at: Option<usize>,
    phase: Phase,
    shift: u8,
    bits: u8,
    received: usize,
    drive_low: bool,
    master_acked: bool,
}

impl Target {
    fn new(address: u8) -> Self {
        Self {
            address,
            memory: [0; 256],
            pointer: 0,
            nack_data_at: None,
            phase: Phase::Idle,
            shift: 0,
            bits: 0,
            received: 0,
            drive_low: false,
            master_acked: false,
        }
    }

    fn on_start(&mut self) {
        self.phase = Phase::Address;
        self.shift = 0;
        self.bits = 0;
        self.received = 0;
        self.drive_low = false;
    }

    fn on_stop(&mut self) {
        self.phase = Phase::Idle;
        self.drive_low = false;
    }

    fn on_scl_rise(&mut self, sda: bool) {
        match self.phase {
            Phase::Address | Phase::Receive => {
                self.shift = (self.shift << 1) | sda as u8;
                self.bits += 1;
            }
            Phase::MasterAck => self.master_acked = !sda,
            _ => {}
        }
    }

    fn on_scl_fall(&mut self) {
        match self.phase {
            Phase::Address if self.bits == 8 => {
                if self.shift >> 1 == self.address {
                    self.drive_low = true;
                    self.phase = Phase::AckOut {
                        read: self.shift & 1 == 1,
                    };
                } else {
                    self.phase = Phase::Idle;
                }
            }
            Phase::Receive if self.bits == 8 => {
                let index = self.received;
                self.received += 1;
                if self.nack_data_at == Some(index) {
                    self.phase = Phase::Idle;
                    return;
                }
                if index == 0 {
                    self.pointer = self.shift;
                } else {
                    self.memory[self.pointer as usize] = self.shift;
                    self.pointer = self.pointer.wrapping_add(1);
                }
                self.drive_low = true;
                self.phase = Phase::AckOut { read: false };
            }
            Phase::AckOut { read } => {
                self.drive_low = false;
                self.bits = 0;
                self.shift = 0;
                if read {
                    self.load_next_byte();
                } else {
                    self.phase = Phase::Receive;
                }
            }
            Phase::Transmit => {
                self.bits += 1;
                if self.bits == 8 {
                    self.drive_low = false;
                    self.phase = Phase::MasterAck;
                } else {
                    self.drive_low = self.shift & (0x80 >> self.bits) == 0;
                }
            }
            Phase::MasterAck => {
                if self.master_acked {
                    self.load_next_byte();
                } else {
                    self.phase = Phase::Idle;
                }
            }
            _ => {}
        }
    }

    fn load_next_byte(&mut self) {
        self.shift = self.memory[self.pointer as usize];
        self.pointer = self.pointer.wrapping_add(1);
        self.bits = 0;
        self.drive_low = self.shift & 0x80 == 0;
        self.phase = Phase::Transmit;
    }
}

struct WireState {
    master_sda_low: bool,
    master_scl_low: bool,
    /// Polls left before a stretched SCL is let go
    stretching: u32,
    /// Stretch applied to the next SCL release
    stretch_next: u32,
    hold_scl: bool,
    sda: bool,
    scl: bool,
    now_us: u64,
    target: Target,
    events: Vec<BusEvent, 8192>,
}

impl WireState {
    fn resolve(&self) -> (bool, bool) {
        let sda = !(self.master_sda_low || self.target.drive_low);
        let scl = !(self.master_scl_low || self.stretching > 0 || self.hold_scl);
        (sda, scl)
    }

    /// Recompute line levels and hand any edges to the target
    fn update(&mut self) {
        let (sda, scl) = self.resolve();

        if self.scl && scl && self.sda != sda {
            if sda {
                self.target.on_stop();
                let _ = self.events.push(BusEvent::Stop);
            } else {
                self.target.on_start();
                let _ = self.events.push(BusEvent::Start);
            }
        } else if !self.scl && scl {
            let _ = self.events.push(BusEvent::Clock { sda });
            self.target.on_scl_rise(sda);
        } else if self.scl && !scl {
            self.target.on_scl_fall();
        }

        self.scl = scl;
        // The target only changes SDA while SCL is low, so this is no condition
        self.sda = self.resolve().0;
    }
}

/// Two bus lines with one target attached
pub struct Wire {
    state: RefCell<WireState>,
}

impl Wire {
    pub fn new(target_address: u8) -> Self {
        Self {
            state: RefCell::new(WireState {
                master_sda_low: false,
                master_scl_low: false,
                stretching: 0,
                stretch_next: 0,
                hold_scl: false,
                sda: true,
                scl: true,
                now_us: 0,
                target: Target::new(target_address),
                events: Vec::new(),
            }),
        }
    }

    pub fn sda_pin(&self) -> SimPin<'_> {
        SimPin::new(self, Line::Sda)
    }

    pub fn scl_pin(&self) -> SimPin<'_> {
        SimPin::new(self, Line::Scl)
    }

    pub fn timer(&self) -> SimTimer<'_> {
        SimTimer { wire: self }
    }

    /// Line levels as (SDA, SCL)
    pub fn levels(&self) -> (bool, bool) {
        let state = self.state.borrow();
        (state.sda, state.scl)
    }

    pub fn now_us(&self) -> u64 {
        self.state.borrow().now_us
    }

    /// Hold SCL low for `polls` reads after the master next releases it
    pub fn stretch_next(&self, polls: u32) {
        self.state.borrow_mut().stretch_next = polls;
    }

    /// Target holds SCL low until told otherwise
    pub fn hold_scl(&self, hold: bool) {
        let mut state = self.state.borrow_mut();
        state.hold_scl = hold;
        state.update();
    }

    pub fn with_target<R>(&self, f: impl FnOnce(&mut Target) -> R) -> R {
        f(&mut self.state.borrow_mut().target)
    }

    pub fn events(&self) -> Vec<BusEvent, 8192> {
        self.state.borrow().events.clone()
    }

    /// Decode the clocked bits into bytes; each byte is followed by its ack bit
    ///
    /// Returns `(byte, acked)` pairs between conditions.
    pub fn frames(&self) -> Vec<(u8, bool), 512> {
        let mut frames = Vec::new();
        let mut bits: Vec<bool, 9> = Vec::new();
        for event in self.state.borrow().events.iter() {
            match event {
                BusEvent::Start | BusEvent::Stop => bits.clear(),
                BusEvent::Clock { sda } => {
                    let _ = bits.push(*sda);
                    if bits.len() == 9 {
                        let byte = bits[..8]
                            .iter()
                            .fold(0u8, |acc, &bit| (acc << 1) | bit as u8);
                        let _ = frames.push((byte, !bits[8]));
                        bits.clear();
                    }
                }
            }
        }
        frames
    }

    fn set_master(&self, line: Line, low: bool) {
        let mut state = self.state.borrow_mut();
        match line {
            Line::Sda => state.master_sda_low = low,
            Line::Scl => {
                if state.master_scl_low && !low {
                    state.stretching = state.stretch_next;
                    state.stretch_next = 0;
                }
                state.master_scl_low = low;
            }
        }
        state.update();
    }

    fn read(&self, line: Line) -> bool {
        let mut state = self.state.borrow_mut();
        if line == Line::Scl && state.stretching > 0 {
            state.stretching -= 1;
            state.update();
        }
        match line {
            Line::Sda => state.sda,
            Line::Scl => state.scl,
        }
    }
}

/// Master-side pin on the simulated wire
pub struct SimPin<'a> {
    wire: &'a Wire,
    line: Line,
    direction: PinDirection,
    level: bool,
}

impl<'a> SimPin<'a> {
    fn new(wire: &'a Wire, line: Line) -> Self {
        Self {
            wire,
            line,
            direction: PinDirection::Input,
            level: false,
        }
    }

    fn apply(&self) {
        let low = self.direction == PinDirection::Output && !self.level;
        self.wire.set_master(self.line, low);
    }
}

impl FlexPin for SimPin<'_> {
    fn set_direction(&mut self, direction: PinDirection) {
        self.direction = direction;
        self.apply();
    }

    fn set_level(&mut self, high: bool) {
        self.level = high;
        self.apply();
    }

    fn is_high(&mut self) -> bool {
        self.wire.read(self.line)
    }
}

/// Timer sharing the wire's clock; every query advances it by 1 µs
pub struct SimTimer<'a> {
    wire: &'a Wire,
}

impl Timer for SimTimer<'_> {
    fn now_us(&mut self) -> u64 {
        let mut state = self.wire.state.borrow_mut();
        state.now_us += 1;
        state.now_us
    }

    fn busy_wait_us(&mut self, us: u32) {
        self.wire.state.borrow_mut().now_us += us as u64;
    }
}
