//! Traffic collision avoidance
//!
//! Short-range avoidance override computed from one tracked traffic
//! contact per cycle, independently of the active flight mode. Produces a
//! bounded roll/pitch lean correction plus discrete tracking/maneuvering
//! flags; the attitude-control path of the active mode consumes the
//! result.
//!
//! The response law and its constants are calibration values fitted in
//! simulation, not first-principles dynamics; they are preserved as-is.

use libm::{atanf, fabsf, sqrtf};
use nalgebra::Vector3;

use crate::log_events::{AuditLog, AvoidanceRecord, LogEvent};

/// Bearing gate: contacts more than this far off the nose are ignored (deg)
const BEARING_GATE_DEG: f32 = 70.0;
/// Contacts closer than this are below the sensor's useful range
const RANGE_MIN: f32 = 50.0;
/// Track (yaw-toward) window upper bound
const TRACK_RANGE_MAX: f32 = 1000.0;
/// Maneuver window upper bound: where we start moving
const MANEUVER_RANGE_MAX: f32 = 700.0;
/// Assumed minimum separation; floors the response as distance shrinks
const SAFETY_BUBBLE: f32 = 500.0;
/// Avoidance gain (calibration value)
const AVOIDANCE_GAIN: f32 = 500.0;
/// Empirical trim term in the response denominator (calibration value)
const RESPONSE_TRIM: f32 = 1.0;
/// Standard gravity (m/s^2)
const GRAVITY_MSS: f32 = 9.81;
/// Lean correction limit (angular units)
const MAX_CORRECTION: f32 = 5.0;
/// Angular units to centi-degrees, sign inversion baked in
const CORRECTION_SCALE_CD: f32 = -10000.0;
/// Yaw-toward-contact rate gain for the logged track term
const YAW_TRACK_GAIN: f32 = 4.5;

/// One tracked traffic contact's relative geometry
///
/// Produced by the external traffic tracker, consumed once per avoidance
/// cycle and not retained. The tracker pre-filters malformed contacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficContact {
    /// Bearing to the contact relative to the nose (degrees, signed)
    pub bearing_deg: f32,
    /// Separation distance (same units as the range windows)
    pub distance: f32,
    /// Relative position of the contact (x longitudinal, y lateral)
    pub rel_position: Vector3<f32>,
    /// Relative (closing) velocity of the contact
    pub rel_velocity: Vector3<f32>,
}

/// Avoidance cycle output
///
/// Overwritten every cycle; no cross-cycle memory.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AvoidanceState {
    /// Escape maneuver corrections are active
    pub maneuvering: bool,
    /// Yaw toward the contact without maneuvering
    pub tracking: bool,
    /// Roll correction (centi-degrees)
    pub roll_correction_cd: f32,
    /// Pitch correction (centi-degrees); always zero, see `update`
    pub pitch_correction_cd: f32,
}

/// Traffic avoidance controller
///
/// Runs on its own cadence; shares nothing with the mode supervisor
/// beyond the one-way [`AvoidanceState`] output.
#[derive(Debug, Default)]
pub struct CollisionAvoidanceController {
    state: AvoidanceState,
}

impl CollisionAvoidanceController {
    pub const fn new() -> Self {
        Self {
            state: AvoidanceState {
                maneuvering: false,
                tracking: false,
                roll_correction_cd: 0.0,
                pitch_correction_cd: 0.0,
            },
        }
    }

    /// Latest cycle output
    pub fn state(&self) -> AvoidanceState {
        self.state
    }

    /// Run one avoidance cycle against the current contact
    ///
    /// Appends an [`AvoidanceRecord`] to the audit log every cycle,
    /// gated or not, for post-flight analysis.
    ///
    /// The pitch channel is an always-zero placeholder: the longitudinal
    /// velocity term is reserved for a future pitch-avoidance law and is
    /// never fed in, only the sign/clamp plumbing exists.
    pub fn update(&mut self, contact: &TrafficContact, log: &mut dyn AuditLog) -> AvoidanceState {
        let bearing = fabsf(contact.bearing_deg);

        // Tracking gate: yaw (but do not move) towards the traffic
        self.state.tracking = bearing < BEARING_GATE_DEG
            && contact.distance > RANGE_MIN
            && contact.distance < TRACK_RANGE_MAX;

        if bearing < BEARING_GATE_DEG
            && contact.distance > RANGE_MIN
            && contact.distance < MANEUVER_RANGE_MAX
        {
            self.state.maneuvering = true;

            // Floor the distance before the division so the response stays
            // bounded as separation shrinks; NaN or non-positive distances
            // never pass the gate above.
            let mut distance = contact.distance;
            if distance < SAFETY_BUBBLE {
                distance = SAFETY_BUBBLE;
            }

            let response =
                10.0 * AVOIDANCE_GAIN / (distance * sqrtf(SAFETY_BUBBLE) - RESPONSE_TRIM);

            // Lateral closing speed drives the roll escape
            let accel_roll = contact.rel_velocity.x * response;
            let accel_pitch = 0.0_f32;

            let mut roll = atanf(accel_roll / GRAVITY_MSS);
            let mut pitch = atanf(accel_pitch / GRAVITY_MSS);

            if fabsf(roll) > MAX_CORRECTION {
                roll = MAX_CORRECTION;
            }
            if fabsf(pitch) > MAX_CORRECTION {
                pitch = MAX_CORRECTION;
            }

            // Orient the escape away from the contact's side
            if contact.rel_position.y < 0.0 {
                roll = -roll;
            }
            if contact.rel_position.x < 0.0 {
                pitch = -pitch;
            }

            self.state.roll_correction_cd = roll * CORRECTION_SCALE_CD;
            self.state.pitch_correction_cd = pitch * CORRECTION_SCALE_CD;
        } else {
            self.state.maneuvering = false;
            self.state.roll_correction_cd = 0.0;
            self.state.pitch_correction_cd = 0.0;
        }

        log.append(LogEvent::Avoidance(AvoidanceRecord {
            maneuvering: self.state.maneuvering,
            tracking: self.state.tracking,
            roll_correction_cd: self.state.roll_correction_cd,
            pitch_correction_cd: self.state.pitch_correction_cd,
            yaw_target_cd: contact.bearing_deg * YAW_TRACK_GAIN,
        }));

        self.state
    }
}
