//! Audit/telemetry event records
//!
//! The supervisor and the avoidance controller append structured records
//! to an [`AuditLog`] sink for post-flight analysis. [`EventRing`] is the
//! default bounded in-memory sink; firmware typically wraps its dataflash
//! backend in the same trait.

use heapless::HistoryBuf;

use crate::mode::FlightMode;

/// Subsystem tags for error records
///
/// Values are the stable on-log error-subsystem codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ErrorSubsystem {
    Main = 1,
    Radio = 2,
    Compass = 3,
    FailsafeRadio = 5,
    FailsafeBattery = 6,
    FailsafeGps = 7,
    FailsafeGcs = 8,
    FailsafeFence = 9,
    FlightMode = 10,
    Gps = 11,
    CrashCheck = 12,
}

/// One avoidance cycle's outputs, logged every cycle regardless of gating
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AvoidanceRecord {
    /// Maneuver gate open: corrections are being produced
    pub maneuvering: bool,
    /// Tracking gate open: yaw toward the contact without maneuvering
    pub tracking: bool,
    /// Roll correction (centi-degrees)
    pub roll_correction_cd: f32,
    /// Pitch correction (centi-degrees); currently always zero
    pub pitch_correction_cd: f32,
    /// Yaw target toward the contact (centi-degrees)
    pub yaw_target_cd: f32,
}

/// Audit/telemetry event
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogEvent {
    /// A mode transition was committed
    ModeChange { mode: FlightMode },
    /// A subsystem recorded an error; `code` is subsystem-specific (the
    /// rejected mode id for the flight-mode subsystem)
    Error { subsystem: ErrorSubsystem, code: u8 },
    /// Avoidance cycle outputs
    Avoidance(AvoidanceRecord),
}

/// Append-only audit/telemetry sink
pub trait AuditLog {
    fn append(&mut self, event: LogEvent);
}

/// Event ring capacity
pub const EVENT_RING_SIZE: usize = 64;

/// Bounded in-memory audit sink
///
/// Keeps the most recent [`EVENT_RING_SIZE`] events, evicting the oldest
/// and counting evictions for diagnostics.
pub struct EventRing {
    buffer: HistoryBuf<LogEvent, EVENT_RING_SIZE>,
    overflow_count: u32,
}

impl EventRing {
    pub const fn new() -> Self {
        Self {
            buffer: HistoryBuf::new(),
            overflow_count: 0,
        }
    }

    /// Number of events currently held
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len() == 0
    }

    /// Events evicted because the ring was full
    pub fn overflow_count(&self) -> u32 {
        self.overflow_count
    }

    /// Iterate events oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &LogEvent> {
        self.buffer.oldest_ordered()
    }
}

impl Default for EventRing {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditLog for EventRing {
    fn append(&mut self, event: LogEvent) {
        if self.buffer.len() == EVENT_RING_SIZE {
            self.overflow_count = self.overflow_count.saturating_add(1);
        }
        self.buffer.write(event);
    }
}
