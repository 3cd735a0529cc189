//! Whole-core scenario tests: supervisor + registry + catalog + avoidance
//! wired together with stand-in control laws and vehicle services.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use nalgebra::Vector3;
use pico_copter_core::avoidance::{CollisionAvoidanceController, TrafficContact};
use pico_copter_core::log_events::{AuditLog, ErrorSubsystem, EventRing, LogEvent};
use pico_copter_core::mode::{
    FlightMode, FlightModeSupervisor, ModeChangeError, ModeController, ModeRegistry,
    MultirotorFrame, VehicleServices,
};
use pico_copter_core::notify::{NotifySink, NotifyState};
use pico_copter_core::traits::{
    CameraMount, ControlLimits, EstimatorLimits, Fence, MissionControl, MissionState,
    TakeoffSequencer, ThrottleController, VehicleState,
};

/// Shared vehicle facts the stand-in services read and write
#[derive(Default)]
struct World {
    armed: Cell<bool>,
    landed: Cell<bool>,
    position_ok: Cell<bool>,
    mission_loaded: Cell<bool>,
    mission_state: Cell<MissionState>,
    mission_stops: Cell<u32>,
    mount_resets: Cell<u32>,
    fence_recoveries: Cell<u32>,
    takeoff_stops: Cell<u32>,
    throttle_seeds: Cell<u32>,
    ticks: RefCell<Vec<FlightMode>>,
}

/// Control law stand-in: checks its mode's position/mission preconditions
/// unless checks are ignored, and records ticks.
struct LawStub {
    mode: FlightMode,
    world: Rc<World>,
}

impl ModeController for LawStub {
    fn init(&mut self, ignore_checks: bool) -> Result<(), &'static str> {
        if ignore_checks {
            return Ok(());
        }
        if self.mode.requires_position_reference() && !self.world.position_ok.get() {
            return Err("no position estimate");
        }
        if matches!(self.mode, FlightMode::Auto | FlightMode::AutoRuas) {
            if !self.world.mission_loaded.get() {
                return Err("no mission loaded");
            }
            self.world.mission_state.set(MissionState::Running);
        }
        Ok(())
    }

    fn run(&mut self) {
        self.world.ticks.borrow_mut().push(self.mode);
    }
}

struct Vehicle(Rc<World>);
impl VehicleState for Vehicle {
    fn armed(&self) -> bool {
        self.0.armed.get()
    }
    fn land_complete(&self) -> bool {
        self.0.landed.get()
    }
    fn pilot_desired_throttle(&self) -> f32 {
        0.5
    }
}

struct Mission(Rc<World>);
impl MissionControl for Mission {
    fn state(&self) -> MissionState {
        self.0.mission_state.get()
    }
    fn stop(&mut self) {
        self.0.mission_stops.set(self.0.mission_stops.get() + 1);
        self.0.mission_state.set(MissionState::Idle);
    }
}

struct Mount(Rc<World>);
impl CameraMount for Mount {
    fn set_mode_to_default(&mut self) {
        self.0.mount_resets.set(self.0.mount_resets.get() + 1);
    }
}

struct FenceStub(Rc<World>);
impl Fence for FenceStub {
    fn manual_recovery_start(&mut self) {
        self.0.fence_recoveries.set(self.0.fence_recoveries.get() + 1);
    }
}

struct Throttle(Rc<World>);
impl ThrottleController for Throttle {
    fn set_accel_throttle_i_from_pilot(&mut self, _pilot_throttle: f32) {
        self.0.throttle_seeds.set(self.0.throttle_seeds.get() + 1);
    }
}

struct Takeoff(Rc<World>);
impl TakeoffSequencer for Takeoff {
    fn stop(&mut self) {
        self.0.takeoff_stops.set(self.0.takeoff_stops.get() + 1);
    }
}

struct Estimator;
impl EstimatorLimits for Estimator {
    fn control_limits(&self) -> ControlLimits {
        ControlLimits {
            ground_speed_limit: 8.0,
            nav_vel_gain_scaler: 1.0,
        }
    }
}

/// Audit ring shared between the supervisor and the avoidance controller
#[derive(Clone)]
struct SharedRing(Rc<RefCell<EventRing>>);
impl AuditLog for SharedRing {
    fn append(&mut self, event: LogEvent) {
        self.0.borrow_mut().append(event);
    }
}

fn build(world: &Rc<World>, ring: &SharedRing) -> FlightModeSupervisor {
    let mut registry = ModeRegistry::new();
    for mode in FlightMode::ALL {
        registry.register(
            mode,
            Box::new(LawStub {
                mode,
                world: world.clone(),
            }),
        );
    }

    let services = VehicleServices {
        vehicle: Box::new(Vehicle(world.clone())),
        mission: Box::new(Mission(world.clone())),
        mount: Box::new(Mount(world.clone())),
        fence: Some(Box::new(FenceStub(world.clone()))),
        throttle: Box::new(Throttle(world.clone())),
        takeoff: Box::new(Takeoff(world.clone())),
        estimator: Box::new(Estimator),
        log: Box::new(ring.clone()),
    };

    FlightModeSupervisor::new(
        FlightMode::Stabilize,
        registry,
        Box::new(MultirotorFrame),
        services,
        Box::new(NotifyState::new()),
    )
}

fn mode_changes(ring: &SharedRing) -> Vec<FlightMode> {
    ring.0
        .borrow()
        .iter()
        .filter_map(|e| match e {
            LogEvent::ModeChange { mode } => Some(*mode),
            _ => None,
        })
        .collect()
}

#[test]
fn test_flight_scenario() {
    let world = Rc::new(World::default());
    let ring = SharedRing(Rc::new(RefCell::new(EventRing::new())));
    let mut supervisor = build(&world, &ring);

    // Disarmed on the ground: Guided can be staged even without a
    // position estimate because checks are ignored while disarmed.
    assert_eq!(supervisor.set_mode(FlightMode::Guided), Ok(()));
    assert_eq!(supervisor.mode(), FlightMode::Guided);

    // Back to a manual mode, arm, take off.
    supervisor.set_mode(FlightMode::Stabilize).unwrap();
    world.armed.set(true);
    world.landed.set(false);

    // Armed without a position estimate: Guided is now rejected and the
    // current mode is untouched.
    assert_eq!(
        supervisor.set_mode(FlightMode::Guided),
        Err(ModeChangeError::Rejected {
            mode: FlightMode::Guided,
            reason: "no position estimate"
        })
    );
    assert_eq!(supervisor.mode(), FlightMode::Stabilize);

    // Position comes good; Auto still needs a mission.
    world.position_ok.set(true);
    assert_eq!(
        supervisor.set_mode(FlightMode::Auto),
        Err(ModeChangeError::Rejected {
            mode: FlightMode::Auto,
            reason: "no mission loaded"
        })
    );

    // Load a mission and fly it.
    world.mission_loaded.set(true);
    assert_eq!(supervisor.set_mode(FlightMode::Auto), Ok(()));
    assert_eq!(world.mission_state.get(), MissionState::Running);

    // Leaving a manual-throttle mode for Auto in flight seeded the
    // throttle integrator exactly once.
    assert_eq!(world.throttle_seeds.get(), 1);

    // Pilot takes over: mission stops, mount returns to default.
    assert_eq!(supervisor.set_mode(FlightMode::Loiter), Ok(()));
    assert_eq!(world.mission_state.get(), MissionState::Idle);
    assert_eq!(world.mission_stops.get(), 1);
    assert_eq!(world.mount_resets.get(), 1);

    // Every committed transition cancelled takeoff and poked the fence.
    let committed = mode_changes(&ring);
    assert_eq!(
        committed,
        [
            FlightMode::Guided,
            FlightMode::Stabilize,
            FlightMode::Auto,
            FlightMode::Loiter,
        ]
    );
    assert_eq!(world.takeoff_stops.get(), committed.len() as u32);
    assert_eq!(world.fence_recoveries.get(), committed.len() as u32);

    // The two rejections were recorded against the flight-mode subsystem.
    let errors: Vec<_> = ring
        .0
        .borrow()
        .iter()
        .filter_map(|e| match e {
            LogEvent::Error { subsystem, code } => Some((*subsystem, *code)),
            _ => None,
        })
        .collect();
    assert_eq!(
        errors,
        [
            (ErrorSubsystem::FlightMode, FlightMode::Guided.id()),
            (ErrorSubsystem::FlightMode, FlightMode::Auto.id()),
        ]
    );
}

#[test]
fn test_update_runs_only_current_law() {
    let world = Rc::new(World::default());
    let ring = SharedRing(Rc::new(RefCell::new(EventRing::new())));
    let mut supervisor = build(&world, &ring);

    supervisor.update();
    supervisor.update();
    supervisor.set_mode(FlightMode::AltHold).unwrap();
    supervisor.update();

    assert_eq!(
        *world.ticks.borrow(),
        [
            FlightMode::Stabilize,
            FlightMode::Stabilize,
            FlightMode::AltHold,
        ]
    );
    assert_eq!(supervisor.control_limits().ground_speed_limit, 8.0);
}

#[test]
fn test_avoidance_feeds_shared_audit_ring() {
    let ring = SharedRing(Rc::new(RefCell::new(EventRing::new())));
    let mut avoidance = CollisionAvoidanceController::new();
    let mut sink = ring.clone();

    let contact = TrafficContact {
        bearing_deg: 20.0,
        distance: 650.0,
        rel_position: Vector3::new(200.0, -150.0, 0.0),
        rel_velocity: Vector3::new(3.0, -1.0, 0.0),
    };
    let state = avoidance.update(&contact, &mut sink);

    assert!(state.maneuvering);
    assert!(state.tracking);
    // Contact on the left: escape rolls away from it
    assert!(state.roll_correction_cd != 0.0);
    assert_eq!(state.pitch_correction_cd, 0.0);

    let records = ring
        .0
        .borrow()
        .iter()
        .filter(|e| matches!(e, LogEvent::Avoidance(_)))
        .count();
    assert_eq!(records, 1);
}
