//! Notify display flags
//!
//! Thin adapter translating the current flight mode into the external
//! autopilot/manual display flag, plus the flag word the notify device
//! renders from.

use alloc::boxed::Box;

use bitflags::bitflags;

use crate::mode::FlightMode;

bitflags! {
    /// Notify device flag word
    ///
    /// The supervisor only drives `AUTOPILOT_MODE`; the remaining bits are
    /// owned by other subsystems in the embedding firmware.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NotifyFlags: u16 {
        /// Motors armed
        const ARMED = 1 << 0;
        /// Autopilot (fully autonomous) mode engaged
        const AUTOPILOT_MODE = 1 << 1;
        /// GPS has a usable fix
        const GPS_FIX = 1 << 2;
        /// A failsafe is active
        const FAILSAFE = 1 << 3;
    }
}

/// Receiver for display-flag updates (LED/notify driver seam)
pub trait NotifySink {
    fn set_autopilot_mode(&mut self, engaged: bool);
}

/// In-memory notify state, usable as a [`NotifySink`]
#[derive(Debug, Default)]
pub struct NotifyState {
    flags: NotifyFlags,
}

impl NotifyState {
    pub const fn new() -> Self {
        Self {
            flags: NotifyFlags::empty(),
        }
    }

    pub fn flags(&self) -> NotifyFlags {
        self.flags
    }

    pub fn set(&mut self, flag: NotifyFlags, on: bool) {
        self.flags.set(flag, on);
    }
}

impl NotifySink for NotifyState {
    fn set_autopilot_mode(&mut self, engaged: bool) {
        self.flags.set(NotifyFlags::AUTOPILOT_MODE, engaged);
    }
}

/// Translates the current mode into the autopilot/manual display flag
///
/// Invoked once per successful transition; no other side effects.
pub struct TelemetryNotifier {
    sink: Box<dyn NotifySink>,
}

impl TelemetryNotifier {
    pub fn new(sink: Box<dyn NotifySink>) -> Self {
        Self { sink }
    }

    /// Push the display flag for a newly committed mode
    pub fn notify_flight_mode(&mut self, mode: FlightMode) {
        self.sink
            .set_autopilot_mode(mode.is_autopilot_display_mode());
    }
}
