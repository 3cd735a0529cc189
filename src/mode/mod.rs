//! Flight Mode Types and Supervision
//!
//! This module owns the closed set of flight mode identifiers, their static
//! classification, the controller dispatch table and the mode supervisor
//! that arbitrates transitions between control laws.
//!
//! # Contents
//!
//! - [`FlightMode`] enumeration and [`ModeId`] diagnostic renderer
//! - Classification predicates and [`ModeDescriptor`] (`catalog`)
//! - [`ModeController`] / [`FrameStrategy`] traits (`traits`)
//! - [`ModeRegistry`] dispatch table (`registry`)
//! - [`FlightModeSupervisor`] transition protocol (`supervisor`)

mod catalog;
mod frame;
mod registry;
mod supervisor;
mod traits;

pub use catalog::ModeDescriptor;
pub use frame::{HeliFrame, MultirotorFrame};
pub use registry::{ModeRegistry, MODE_TABLE_SIZE};
pub use supervisor::{FlightModeSupervisor, ModeChangeError, VehicleServices};
pub use traits::{FrameStrategy, ModeController};

use core::fmt;

/// Flight mode identifiers
///
/// Numeric values are the wire/log identifiers and must stay stable; the
/// `Ruas` variants are the alternate-input-profile forms of Stabilize and
/// Auto and take the next free ids after Throw.
///
/// Exactly one mode is current at any time. There is no "no mode" state
/// once the boot mode has been set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FlightMode {
    /// Manual airframe angle with manual throttle
    Stabilize = 0,
    /// Manual body-frame angular rate with manual throttle
    Acro = 1,
    /// Manual airframe angle with automatic throttle
    AltHold = 2,
    /// Fully automatic waypoint control using mission commands
    Auto = 3,
    /// Fully automatic fly-to-coordinate from ground station
    Guided = 4,
    /// Automatic horizontal acceleration with automatic throttle
    Loiter = 5,
    /// Automatic return to launch point
    Rtl = 6,
    /// Automatic circular flight with automatic throttle
    Circle = 7,
    /// Automatic landing with horizontal position control
    Land = 9,
    /// Semi-automatic position, yaw and throttle control
    Drift = 11,
    /// Manual earth-frame angular rate control with manual throttle
    Sport = 13,
    /// Automatically flip the vehicle on the roll axis
    Flip = 14,
    /// Automatically tune the vehicle's roll and pitch gains
    Autotune = 15,
    /// Automatic position hold with manual override
    PosHold = 16,
    /// Full-brake using inertial/GPS system
    Brake = 17,
    /// Throw-to-launch mode
    Throw = 18,
    /// Stabilize under the alternate input profile
    StabilizeRuas = 19,
    /// Auto under the alternate input profile
    AutoRuas = 20,
}

impl FlightMode {
    /// Every defined mode, for exhaustive iteration in arming/UI code
    pub const ALL: [FlightMode; 18] = [
        FlightMode::Stabilize,
        FlightMode::Acro,
        FlightMode::AltHold,
        FlightMode::Auto,
        FlightMode::Guided,
        FlightMode::Loiter,
        FlightMode::Rtl,
        FlightMode::Circle,
        FlightMode::Land,
        FlightMode::Drift,
        FlightMode::Sport,
        FlightMode::Flip,
        FlightMode::Autotune,
        FlightMode::PosHold,
        FlightMode::Brake,
        FlightMode::Throw,
        FlightMode::StabilizeRuas,
        FlightMode::AutoRuas,
    ];

    /// Numeric identifier as used on the wire and in logs
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Look up a mode from its numeric identifier
    ///
    /// Returns `None` for ids with no defined mode (8, 10, 12 and
    /// anything above `AutoRuas`).
    pub const fn from_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => FlightMode::Stabilize,
            1 => FlightMode::Acro,
            2 => FlightMode::AltHold,
            3 => FlightMode::Auto,
            4 => FlightMode::Guided,
            5 => FlightMode::Loiter,
            6 => FlightMode::Rtl,
            7 => FlightMode::Circle,
            9 => FlightMode::Land,
            11 => FlightMode::Drift,
            13 => FlightMode::Sport,
            14 => FlightMode::Flip,
            15 => FlightMode::Autotune,
            16 => FlightMode::PosHold,
            17 => FlightMode::Brake,
            18 => FlightMode::Throw,
            19 => FlightMode::StabilizeRuas,
            20 => FlightMode::AutoRuas,
            _ => return None,
        })
    }

    /// Stable short name for logs and telemetry
    pub const fn name(self) -> &'static str {
        match self {
            FlightMode::Stabilize => "STABILIZE",
            FlightMode::Acro => "ACRO",
            FlightMode::AltHold => "ALT_HOLD",
            FlightMode::Auto => "AUTO",
            FlightMode::Guided => "GUIDED",
            FlightMode::Loiter => "LOITER",
            FlightMode::Rtl => "RTL",
            FlightMode::Circle => "CIRCLE",
            FlightMode::Land => "LAND",
            FlightMode::Drift => "DRIFT",
            FlightMode::Sport => "SPORT",
            FlightMode::Flip => "FLIP",
            FlightMode::Autotune => "AUTOTUNE",
            FlightMode::PosHold => "POSHOLD",
            FlightMode::Brake => "BRAKE",
            FlightMode::Throw => "THROW",
            FlightMode::StabilizeRuas => "STAB_RUAS",
            FlightMode::AutoRuas => "AUTO_RUAS",
        }
    }
}

impl fmt::Display for FlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw numeric mode identifier for diagnostics
///
/// Renders known ids by their short name and unknown ids as `Mode(<id>)`,
/// so a GCS-supplied identifier can always be printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeId(pub u8);

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match FlightMode::from_id(self.0) {
            Some(mode) => f.write_str(mode.name()),
            None => write!(f, "Mode({})", self.0),
        }
    }
}
