#![cfg_attr(not(test), no_std)]

//! pico_copter_core - Flight-mode supervisory core for a multirotor autopilot
//!
//! This crate contains the mode arbitration layer of the vehicle: the
//! classification of every flight mode, the transition protocol between
//! control laws, per-tick dispatch to the active controller, exit cleanup,
//! and the short-range traffic avoidance override.
//!
//! The control laws themselves (acro, stabilize, loiter, guided, auto, RTL,
//! ...) live outside this crate and are reached through the narrow
//! [`mode::ModeController`] contract. Sensor fusion, the mission engine,
//! telemetry transport and the fence are likewise injected through traits.
//!
//! # Design Principles
//!
//! - **Pure no_std**: Host-testable, no platform dependencies
//! - **Trait abstractions**: Vehicle services injected via traits
//! - **Single control thread**: `set_mode` and `update` are never
//!   concurrent; the supervisor carries no locks
//!
//! # Modules
//!
//! - [`mode`]: `FlightMode` enum, classification, registry, supervisor
//! - [`avoidance`]: Traffic contact gates and bounded lean corrections
//! - [`notify`]: Autopilot/manual display flag adapter
//! - [`traits`]: Collaborator service traits (arm state, mission, fence, ...)
//! - [`log_events`]: Audit/telemetry event records and bounded event ring

extern crate alloc;

pub mod avoidance;
pub mod log_events;
pub mod mode;
pub mod notify;
pub mod traits;
