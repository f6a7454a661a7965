#![cfg_attr(not(any(test, feature = "std")), no_std)]

use thiserror::Error;

pub mod scheduling;

pub use scheduling::{
    global::GlobalScheduler,
    queue::Scheduler,
    time::{is_before, Millis, Period, MAX_SLEEP},
    unit::{Callback, WorkId, WorkUnit},
    Platform,
};

#[cfg(any(test, feature = "std"))]
pub use scheduling::host::HostPlatform;

/// Error type for all scheduler operations.
///
/// Everything except `CapacityExhausted` is a programmer error. The trapping
/// entry points (`insert`, `remove`, `init`) abort on these when the invariant
/// guard is compiled in; the `try_` forms hand them back instead.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum SchedError {
    #[error("scheduler initialized more than once")]
    AlreadyInitialized,
    #[error("scheduler used before initialization")]
    NotInitialized,
    #[error("scheduler is running; use the handle passed to the callback")]
    Busy,
    #[error("all {0} work unit slots are occupied")]
    CapacityExhausted(usize),
    #[error("no work unit registered under id {0}")]
    UnknownUnit(usize),
    #[error("work unit {0} has no callback")]
    MissingCallback(usize),
    #[error("work unit {0} is already in the schedule")]
    AlreadyScheduled(usize),
    #[error("work unit {0} is not in the schedule")]
    NotScheduled(usize),
    #[error("work unit {0} is still in the schedule and cannot be released")]
    StillScheduled(usize),
}
