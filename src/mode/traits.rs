//! Mode controller and frame strategy traits

use super::FlightMode;

/// Per-mode control law entry points
///
/// Each flight mode's control law implements this trait and is registered
/// in the [`super::ModeRegistry`]. The supervisor drives the lifecycle:
///
/// 1. `init(ignore_checks)` - attempt activation on mode entry
/// 2. `run()` - per-tick control computation while the mode is current
/// 3. `on_exit()` - cleanup when the mode is left
///
/// `run` must be a bounded, non-blocking computation; `init` may validate
/// preconditions (position estimate, mission validity) but must not
/// perform I/O that can stall the control loop.
pub trait ModeController {
    /// Attempt to activate the mode
    ///
    /// `ignore_checks` is true while disarmed: any mode may be staged on
    /// the ground because the arming checks are the actual gate before
    /// flight. Returns `Err` with a short reason when preconditions fail
    /// (e.g. Loiter without a position estimate, Auto without a mission).
    fn init(&mut self, ignore_checks: bool) -> Result<(), &'static str>;

    /// Per-tick control computation, invoked only while this mode is current
    fn run(&mut self);

    /// Cleanup when this mode is left (stop autotune, cancel throw
    /// detection, ...). Default is a no-op; must not fail.
    fn on_exit(&mut self) {}
}

/// Airframe-specific mode-exit behavior
///
/// Replaces the scattered per-frame conditionals of the exit path with a
/// strategy chosen once at startup. Multirotors need nothing here;
/// helicopters reset their manual passthrough and collective ramp state,
/// see [`super::HeliFrame`].
pub trait FrameStrategy {
    /// Called on every mode transition after the common exit cleanup
    fn on_mode_exit(&mut self, old_mode: FlightMode, new_mode: FlightMode);
}
