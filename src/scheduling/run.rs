//! The run loop: sleep until the head of the schedule is due, fire it, re-arm it.
use log::{debug, trace};

use super::{
    queue::Scheduler,
    time::{self, MAX_SLEEP},
    Platform,
};

impl<P: Platform, const N: usize> Scheduler<P, N> {
    /// Fire work units in due order until the schedule is empty.
    ///
    /// Returns straight away on an empty schedule. Callbacks must not call `run`.
    pub fn run(&mut self) {
        debug!("run: {} work units scheduled", self.len());
        while self.step() {}
        debug!("run: schedule empty at {}", self.platform.now());
    }

    /// One cycle of the run loop. Returns `false` without touching the platform when
    /// nothing is scheduled.
    ///
    /// A unit still at the head after its callback is removed and inserted again, so
    /// its next due time counts from now with whatever period it has now. A callback
    /// that removed or re-inserted units itself is left as it is.
    pub fn step(&mut self) -> bool {
        let Some(current) = self.head else {
            return false;
        };

        let due_at = self.due(current);
        let wait = time::until(self.platform.now(), due_at);
        // Overdue units wrap to a huge wait and fire immediately.
        if wait > 0 && wait <= MAX_SLEEP {
            trace!("sleeping {wait}ms until work unit {}", current.index());
            self.platform.sleep_for(wait);
        }

        let callback = self.units[current.index()]
            .as_ref()
            .and_then(|unit| unit.callback);
        if let Some(callback) = callback {
            trace!("firing work unit {} due at {due_at}", current.index());
            callback(self, current);
        }

        if self.head == Some(current) {
            self.unlink(current);
            self.link(current);
        }
        true
    }
}
