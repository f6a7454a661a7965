//! Invariant guard: precondition checks run in front of every queue mutation.
//!
//! The checks are always reachable through the `try_` entry points. The trapping entry
//! points only run them when the guard is compiled in, which is the case for debug builds
//! and for any build with the `strict` feature. Each check costs a full scan of the
//! schedule.
use log::error;

use crate::SchedError;

use super::{queue::Scheduler, unit::WorkId, Platform};

/// Whether `insert`, `remove` and `init` validate their preconditions and trap.
pub const STRICT: bool = cfg!(any(feature = "strict", debug_assertions));

/// Stop on a programmer error. Release profiles build with `panic = "abort"`.
#[cold]
#[track_caller]
pub fn trap(err: SchedError) -> ! {
    error!("scheduler misuse: {err}");
    panic!("scheduler misuse: {err}")
}

impl<P: Platform, const N: usize> Scheduler<P, N> {
    pub(crate) fn check_insert(&self, id: WorkId) -> Result<(), SchedError> {
        let unit = self.unit(id)?;
        if unit.callback.is_none() {
            return Err(SchedError::MissingCallback(id.0));
        }
        if self.scheduled().any(|linked| linked == id) {
            return Err(SchedError::AlreadyScheduled(id.0));
        }
        Ok(())
    }

    pub(crate) fn check_remove(&self, id: WorkId) -> Result<(), SchedError> {
        self.unit(id)?;
        if !self.is_scheduled(id) {
            return Err(SchedError::NotScheduled(id.0));
        }
        Ok(())
    }
}
