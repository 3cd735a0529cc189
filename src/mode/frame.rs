//! Airframe strategies
//!
//! Frame-specific cleanup run at the tail of every mode transition.

use alloc::boxed::Box;

use super::{FlightMode, FrameStrategy};
use crate::traits::HeliControls;

/// Multirotor airframe: no frame-specific exit cleanup
#[derive(Debug, Default)]
pub struct MultirotorFrame;

impl FrameStrategy for MultirotorFrame {
    fn on_mode_exit(&mut self, _old_mode: FlightMode, _new_mode: FlightMode) {}
}

/// Traditional-helicopter airframe
///
/// Helicopter actuation keeps passthrough paths and a collective ramp that
/// only manual modes use; both must be reset deterministically on mode
/// changes so the next mode does not inherit stale actuation state.
pub struct HeliFrame {
    controls: Box<dyn HeliControls>,
}

impl HeliFrame {
    pub fn new(controls: Box<dyn HeliControls>) -> Self {
        Self { controls }
    }
}

impl FrameStrategy for HeliFrame {
    fn on_mode_exit(&mut self, old_mode: FlightMode, new_mode: FlightMode) {
        // Firmly drop the flybar passthrough when leaving acro
        if old_mode == FlightMode::Acro {
            self.controls.set_flybar_passthrough(false, false);
            self.controls.set_acro_tail(false);
        }

        // Pre-load the stab collective ramp when coming from a mode that
        // did not use manual throttle, to avoid a collective twitch. The
        // ramp is only meaningful switching between Stabilize and Acro.
        if !old_mode.has_manual_throttle() {
            match new_mode {
                FlightMode::Stabilize | FlightMode::StabilizeRuas => {
                    self.controls.set_stab_col_ramp(1.0);
                }
                FlightMode::Acro => {
                    self.controls.set_stab_col_ramp(0.0);
                }
                _ => {}
            }
        }

        // RC passthrough to motors never survives a mode change
        self.controls.reset_radio_passthrough();
    }
}
