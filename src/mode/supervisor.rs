//! Flight mode supervisor
//!
//! Owns the single current-mode value and implements the transition
//! protocol (`set_mode`), the per-tick dispatch (`update`) and the exit
//! cleanup protocol (`exit_mode`).
//!
//! ## Transition protocol
//!
//! 1. Requesting the current mode is an idempotent no-op
//! 2. While disarmed any mode may be staged (`ignore_checks`); the arming
//!    checks are the real gate before flight
//! 3. The target controller's `init` decides success; Acro, Stabilize
//!    (both profiles), Land, Drift and Sport are contracted to always
//!    accept
//! 4. On success the old mode is cleaned up *before* the new mode is
//!    committed, so exit cleanup always observes the old mode as current
//!    and cannot clobber init-time state of the new mode
//! 5. On failure the current mode is untouched and an error record is
//!    appended; this core never retries or falls back on its own
//!
//! ## Concurrency
//!
//! `set_mode` and `update` run on the same control thread and are never
//! concurrent; the supervisor carries no locks.

use alloc::boxed::Box;
use core::fmt;

use super::{FlightMode, FrameStrategy, ModeId, ModeRegistry};
use crate::log_events::{AuditLog, ErrorSubsystem, LogEvent};
use crate::notify::{NotifySink, TelemetryNotifier};
use crate::traits::{
    CameraMount, ControlLimits, EstimatorLimits, Fence, MissionControl, MissionState,
    TakeoffSequencer, ThrottleController, VehicleState,
};

/// A rejected mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChangeError {
    /// The target controller refused activation; current mode unchanged
    Rejected {
        mode: FlightMode,
        reason: &'static str,
    },
    /// The numeric identifier names no defined mode
    UnknownMode { id: u8 },
}

impl fmt::Display for ModeChangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeChangeError::Rejected { mode, reason } => {
                write!(f, "mode change to {} rejected: {}", mode, reason)
            }
            ModeChangeError::UnknownMode { id } => {
                write!(f, "unknown mode identifier {}", ModeId(*id))
            }
        }
    }
}

/// Vehicle subsystems the supervisor touches
///
/// All are narrow seams implemented by the embedding firmware. The fence
/// is optional because not every vehicle carries one.
pub struct VehicleServices {
    pub vehicle: Box<dyn VehicleState>,
    pub mission: Box<dyn MissionControl>,
    pub mount: Box<dyn CameraMount>,
    pub fence: Option<Box<dyn Fence>>,
    pub throttle: Box<dyn ThrottleController>,
    pub takeoff: Box<dyn TakeoffSequencer>,
    pub estimator: Box<dyn EstimatorLimits>,
    pub log: Box<dyn AuditLog>,
}

/// Flight mode supervisor
///
/// The only writer of the current-mode value; all reads and writes go
/// through its methods.
pub struct FlightModeSupervisor {
    current: FlightMode,
    registry: ModeRegistry,
    frame: Box<dyn FrameStrategy>,
    services: VehicleServices,
    notifier: TelemetryNotifier,
    control_limits: ControlLimits,
}

impl FlightModeSupervisor {
    /// Create the supervisor in the vehicle's boot mode
    ///
    /// The boot mode is initialized with checks ignored (the vehicle is on
    /// the ground, disarmed); a failure here is logged but the mode is
    /// still committed so the vehicle is never without an active mode.
    pub fn new(
        boot_mode: FlightMode,
        mut registry: ModeRegistry,
        frame: Box<dyn FrameStrategy>,
        mut services: VehicleServices,
        notify: Box<dyn NotifySink>,
    ) -> Self {
        if registry.init(boot_mode, true).is_err() {
            services.log.append(LogEvent::Error {
                subsystem: ErrorSubsystem::FlightMode,
                code: boot_mode.id(),
            });
        }

        let mut notifier = TelemetryNotifier::new(notify);
        notifier.notify_flight_mode(boot_mode);

        Self {
            current: boot_mode,
            registry,
            frame,
            services,
            notifier,
            control_limits: ControlLimits::default(),
        }
    }

    /// Currently active flight mode
    pub fn mode(&self) -> FlightMode {
        self.current
    }

    /// Latest control-authority limits from the state estimator
    pub fn control_limits(&self) -> ControlLimits {
        self.control_limits
    }

    /// Change flight mode, performing any necessary initialisation
    ///
    /// Acro, Stabilize (both profiles), Land, Drift and Sport always
    /// succeed; the return value of other modes must be checked and the
    /// caller decides the fallback (this core never retries).
    pub fn set_mode(&mut self, mode: FlightMode) -> Result<(), ModeChangeError> {
        // Return immediately if we are already in the desired mode
        if mode == self.current {
            return Ok(());
        }

        // Allow switching to any mode if disarmed; we rely on the arming
        // checks to gate what the vehicle can actually take off in.
        let ignore_checks = !self.services.vehicle.armed();

        match self.registry.init(mode, ignore_checks) {
            Ok(()) => {
                // Cleanup for the previous mode must see it still current,
                // so the commit happens strictly after exit_mode returns.
                let old_mode = self.current;
                self.exit_mode(old_mode, mode);
                self.current = mode;

                self.services.log.append(LogEvent::ModeChange { mode });

                // A deliberate mode change during a fence breach is the
                // pilot manually recovering; stand the fence down.
                if let Some(fence) = self.services.fence.as_mut() {
                    fence.manual_recovery_start();
                }

                self.notifier.notify_flight_mode(mode);
                Ok(())
            }
            Err(reason) => {
                self.services.log.append(LogEvent::Error {
                    subsystem: ErrorSubsystem::FlightMode,
                    code: mode.id(),
                });
                Err(ModeChangeError::Rejected { mode, reason })
            }
        }
    }

    /// Change flight mode from a raw (GCS-supplied) numeric identifier
    pub fn set_mode_id(&mut self, id: u8) -> Result<(), ModeChangeError> {
        match FlightMode::from_id(id) {
            Some(mode) => self.set_mode(mode),
            None => {
                self.services.log.append(LogEvent::Error {
                    subsystem: ErrorSubsystem::FlightMode,
                    code: id,
                });
                Err(ModeChangeError::UnknownMode { id })
            }
        }
    }

    /// Per-tick dispatch: refresh estimator limits, run the active mode
    ///
    /// Called from the main loop at 100 Hz or more. Never blocks and never
    /// fails: a mode that is current is always initialized and runnable.
    pub fn update(&mut self) {
        self.control_limits = self.services.estimator.control_limits();
        self.registry.run(self.current);
    }

    /// Cleanup as a flight mode is exited
    ///
    /// Total over all `(old, new)` pairs; branches that do not apply are
    /// no-ops and nothing here can fail, since a transition that reached
    /// cleanup has already been committed to succeed.
    pub fn exit_mode(&mut self, old_mode: FlightMode, new_mode: FlightMode) {
        // Mode-specific cleanup (stop autotune, cancel throw detection, ...)
        self.registry.on_exit(old_mode);

        // Stop the mission and release the camera mount when leaving auto
        if matches!(old_mode, FlightMode::Auto | FlightMode::AutoRuas) {
            if self.services.mission.state() == MissionState::Running {
                self.services.mission.stop();
            }
            self.services.mount.set_mode_to_default();
        }

        // Smooth the throttle hand-over from manual to automatic throttle:
        // seed the accel-throttle integrator from the pilot's last command
        // so altitude hold engages without a step.
        if old_mode.has_manual_throttle()
            && !new_mode.has_manual_throttle()
            && self.services.vehicle.armed()
            && !self.services.vehicle.land_complete()
        {
            let pilot_throttle = self.services.vehicle.pilot_desired_throttle();
            self.services
                .throttle
                .set_accel_throttle_i_from_pilot(pilot_throttle);
        }

        // A mode switch mid-takeoff must not leave a dangling takeoff
        self.services.takeoff.stop();

        self.frame.on_mode_exit(old_mode, new_mode);
    }
}
