//! A cooperative, allocation-free callback scheduler driven by a single millisecond clock.
//!
//! Work units live in a fixed-capacity arena inside [`queue::Scheduler`] and are threaded
//! into a due-time ordered list by index. The run loop sleeps until the earliest unit is due,
//! fires it, and re-arms it unless the callback took it out of the schedule itself.
pub mod global;
pub mod guard;
#[cfg(any(test, feature = "std"))]
pub mod host;
pub mod queue;
pub mod run;
#[cfg(test)]
pub(crate) mod sim;
pub mod time;
pub mod unit;

use time::Millis;

/// The clock and sleep primitives a scheduler runs on.
///
/// `now` is a monotonic millisecond counter that wraps silently at `u32::MAX`.
/// `sleep_for` is best effort and may return early; the run loop never passes it
/// zero or anything above [`time::MAX_SLEEP`].
pub trait Platform {
    fn now(&self) -> Millis;
    fn sleep_for(&mut self, duration: Millis);
}
