//! Mode classification
//!
//! Static, compile-time classification of every flight mode: whether it
//! needs a position reference, whether the pilot commands throttle
//! directly, whether the vehicle may be armed in it, and how it is shown
//! on the autopilot/manual display. Pure lookups, no state.

use super::FlightMode;

/// Static per-mode classification flags
///
/// `arming_eligible` is the base (pilot-stick) eligibility; Guided becomes
/// eligible only for ground-station requests, see
/// [`FlightMode::allows_arming`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeDescriptor {
    /// Control law needs a valid horizontal position/velocity estimate
    pub requires_position_reference: bool,
    /// Pilot stick maps directly to commanded throttle
    pub has_manual_throttle: bool,
    /// Vehicle may be armed in this mode from the pilot stick
    pub arming_eligible: bool,
    /// Shown as "autopilot engaged" on the notify display
    pub is_autopilot_mode: bool,
}

impl FlightMode {
    /// True if the mode's control law needs a horizontal position estimate
    pub const fn requires_position_reference(self) -> bool {
        matches!(
            self,
            FlightMode::Auto
                | FlightMode::AutoRuas
                | FlightMode::Guided
                | FlightMode::Loiter
                | FlightMode::Rtl
                | FlightMode::Circle
                | FlightMode::Drift
                | FlightMode::PosHold
                | FlightMode::Brake
                | FlightMode::Throw
        )
    }

    /// True if the pilot directly controls throttle in this mode
    pub const fn has_manual_throttle(self) -> bool {
        matches!(
            self,
            FlightMode::Acro | FlightMode::Stabilize | FlightMode::StabilizeRuas
        )
    }

    /// True if the vehicle can be armed in this mode
    ///
    /// `arming_from_gcs` must be true when the arming request comes from
    /// the ground station rather than the pilot stick. Guided is only
    /// arming-eligible from the ground station: arming straight into an
    /// autonomous mode from a stick gesture is disallowed.
    pub const fn allows_arming(self, arming_from_gcs: bool) -> bool {
        self.has_manual_throttle()
            || matches!(
                self,
                FlightMode::Loiter
                    | FlightMode::AltHold
                    | FlightMode::PosHold
                    | FlightMode::Drift
                    | FlightMode::Sport
                    | FlightMode::Throw
            )
            || (arming_from_gcs && matches!(self, FlightMode::Guided))
    }

    /// True if the mode is displayed as "autopilot engaged"
    ///
    /// Everything else is pilot-in-the-loop.
    pub const fn is_autopilot_display_mode(self) -> bool {
        matches!(
            self,
            FlightMode::Auto
                | FlightMode::AutoRuas
                | FlightMode::Guided
                | FlightMode::Rtl
                | FlightMode::Circle
                | FlightMode::Land
        )
    }

    /// Full classification record for this mode
    pub const fn descriptor(self) -> ModeDescriptor {
        ModeDescriptor {
            requires_position_reference: self.requires_position_reference(),
            has_manual_throttle: self.has_manual_throttle(),
            arming_eligible: self.allows_arming(false),
            is_autopilot_mode: self.is_autopilot_display_mode(),
        }
    }
}
