//! USB link state, as reported by the device stack
//!
//! Drives the status LED: lit while the host has the device configured,
//! dark after a bus reset, an unconfigure or loss of bus power.

/// Device-level USB state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// No bus power
    #[default]
    Detached,
    /// Powered and enumerating, not configured
    Attached,
    /// Host selected a configuration
    Configured,
}

/// Notifications from the USB device stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Bus power came or went
    Enabled(bool),
    /// Bus reset; drops any configuration
    Reset,
    /// Configuration set or cleared
    Configured(bool),
}

impl LinkState {
    /// Check if the host has the device configured
    pub fn is_configured(&self) -> bool {
        matches!(self, LinkState::Configured)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use LinkEvent::*;
        use LinkState::*;

        match (self, event) {
            (_, Enabled(false)) => Detached,
            (Detached, Enabled(true)) => Attached,
            (_, Reset) => Attached,
            (_, LinkEvent::Configured(true)) => LinkState::Configured,
            (LinkState::Configured, LinkEvent::Configured(false)) => Attached,

            _ => self,
        }
    }
}
