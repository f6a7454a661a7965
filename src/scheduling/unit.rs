//! Work units: the callback, period and queue link of one schedulable task.
use core::fmt;

use super::{
    queue::Scheduler,
    time::{Millis, Period},
};

/// Work performed when a unit comes due.
///
/// The callback gets the scheduler and the id of the unit being fired, so it can
/// change its own period, take itself out of the schedule, or touch other units.
pub type Callback<P, const N: usize> = fn(&mut Scheduler<P, N>, WorkId);

/// Stable handle to a work unit registered with a [`Scheduler`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkId(pub(crate) usize);

impl WorkId {
    /// Arena slot backing this unit.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One schedulable task.
pub struct WorkUnit<P, const N: usize> {
    /// Must be set before the unit is inserted.
    pub callback: Option<Callback<P, N>>,
    /// Desired re-fire interval. Zero fires as often as the loop comes around.
    pub period: Period,
    pub(crate) due_at: Millis,
    pub(crate) next: Option<WorkId>,
}

impl<P, const N: usize> WorkUnit<P, N> {
    pub const fn new(callback: Callback<P, N>, period: Period) -> Self {
        Self {
            callback: Some(callback),
            period,
            due_at: 0,
            next: None,
        }
    }

    /// Due time computed at the last insertion. Meaningless before the first one.
    pub const fn due_at(&self) -> Millis {
        self.due_at
    }
}

impl<P, const N: usize> fmt::Debug for WorkUnit<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkUnit")
            .field("has_callback", &self.callback.is_some())
            .field("period", &self.period)
            .field("due_at", &self.due_at)
            .field("next", &self.next)
            .finish()
    }
}
