//! Mode controller registry
//!
//! Fixed table mapping each flight mode id to its control law's entry
//! points. Dispatch is an index into the table - O(1), no allocation and
//! no failure path once a mode is current.

use alloc::boxed::Box;

use super::{FlightMode, ModeController};

/// Table size: one slot per mode id (ids are dense enough to index directly)
pub const MODE_TABLE_SIZE: usize = FlightMode::AutoRuas as usize + 1;

/// Per-mode controller table
///
/// Populated once at startup by the embedding firmware. A mode with no
/// registered controller fails `init` (and therefore any transition into
/// it); it never panics.
pub struct ModeRegistry {
    entries: [Option<Box<dyn ModeController>>; MODE_TABLE_SIZE],
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self {
            entries: core::array::from_fn(|_| None),
        }
    }

    /// Register the controller for a mode, replacing any previous entry
    pub fn register(&mut self, mode: FlightMode, controller: Box<dyn ModeController>) {
        self.entries[mode as usize] = Some(controller);
    }

    /// True if a controller is registered for the mode
    pub fn is_registered(&self, mode: FlightMode) -> bool {
        self.entries[mode as usize].is_some()
    }

    /// Attempt to activate the mode's controller
    pub fn init(&mut self, mode: FlightMode, ignore_checks: bool) -> Result<(), &'static str> {
        match self.entries[mode as usize].as_mut() {
            Some(controller) => controller.init(ignore_checks),
            None => Err("mode not registered"),
        }
    }

    /// Run the mode's per-tick computation
    pub fn run(&mut self, mode: FlightMode) {
        if let Some(controller) = self.entries[mode as usize].as_mut() {
            controller.run();
        }
    }

    /// Run the mode's exit cleanup hook
    pub fn on_exit(&mut self, mode: FlightMode) {
        if let Some(controller) = self.entries[mode as usize].as_mut() {
            controller.on_exit();
        }
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
