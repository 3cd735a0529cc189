//! Collaborator service traits
//!
//! The supervisor reaches every vehicle subsystem it touches through a
//! trait, so the core stays platform-agnostic and host-testable. The
//! embedding firmware provides the concrete implementations.

/// Motor arm and landing state, owned by the actuation subsystem
///
/// Read-only to this crate.
pub trait VehicleState {
    /// True while motors are armed
    fn armed(&self) -> bool;
    /// True while the vehicle is considered landed
    fn land_complete(&self) -> bool;
    /// Pilot's last commanded throttle, translated to output units
    fn pilot_desired_throttle(&self) -> f32;
}

/// Mission engine execution state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MissionState {
    /// No mission active
    #[default]
    Idle,
    /// Mission running, executing commands
    Running,
    /// Mission completed
    Completed,
}

/// Mission engine query/stop interface
pub trait MissionControl {
    fn state(&self) -> MissionState;
    /// Stop the running mission; no-op when idle
    fn stop(&mut self);
}

/// Camera mount override reset
pub trait CameraMount {
    /// Return the mount to its default (parameter-driven) behavior
    fn set_mode_to_default(&mut self);
}

/// Geofence recovery trigger
pub trait Fence {
    /// Signal that the pilot is manually recovering from a breach; the
    /// fence stands down instead of fighting the operator.
    fn manual_recovery_start(&mut self);
}

/// Automatic throttle controller seam
pub trait ThrottleController {
    /// Seed the acceleration-throttle integrator from the pilot's
    /// throttle so auto-throttle engages without a step.
    fn set_accel_throttle_i_from_pilot(&mut self, pilot_throttle: f32);
}

/// Automated takeoff sequencer
pub trait TakeoffSequencer {
    /// Cancel any takeoff in progress; no-op otherwise
    fn stop(&mut self);
}

/// Control-authority limits derived from state-estimator confidence
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlLimits {
    /// Ground speed limit (m/s), e.g. while navigating on optical flow
    pub ground_speed_limit: f32,
    /// Scale factor on navigation velocity gains
    pub nav_vel_gain_scaler: f32,
}

impl Default for ControlLimits {
    fn default() -> Self {
        Self {
            ground_speed_limit: f32::INFINITY,
            nav_vel_gain_scaler: 1.0,
        }
    }
}

/// State estimator's view of how hard the vehicle may be flown
pub trait EstimatorLimits {
    fn control_limits(&self) -> ControlLimits;
}

/// Helicopter actuation paths touched on mode exit
///
/// Only used by [`crate::mode::HeliFrame`].
pub trait HeliControls {
    /// Route roll/pitch (main) and yaw (tail) sticks straight to the swash
    fn set_flybar_passthrough(&mut self, main: bool, tail: bool);
    /// Direct tail control in acro
    fn set_acro_tail(&mut self, on: bool);
    /// Pre-load the stabilize collective ramp (0.0..=1.0)
    fn set_stab_col_ramp(&mut self, ramp: f32);
    /// Drop any RC passthrough to the motors
    fn reset_radio_passthrough(&mut self);
}
