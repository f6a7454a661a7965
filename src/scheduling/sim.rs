//! Simulated platform for tests: the clock only moves when the run loop sleeps
//! or a callback moves it by hand.
use super::{
    queue::Scheduler,
    time::{is_before, Millis, MAX_SLEEP},
    unit::WorkId,
    Platform,
};

#[derive(Debug, Default)]
pub(crate) struct SimPlatform {
    pub now: Millis,
    pub sleeps: Vec<Millis>,
    pub fires: Vec<(WorkId, Millis)>,
    pub counters: [u32; 8],
}

impl SimPlatform {
    pub fn at(now: Millis) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }
}

impl Platform for SimPlatform {
    fn now(&self) -> Millis {
        self.now
    }

    fn sleep_for(&mut self, duration: Millis) {
        assert_ne!(duration, 0, "zero-length sleep requested");
        assert!(duration <= MAX_SLEEP, "sleep of {duration}ms exceeds period width");
        self.sleeps.push(duration);
        self.now = self.now.wrapping_add(duration);
    }
}

pub(crate) type SimScheduler<const N: usize> = Scheduler<SimPlatform, N>;

pub(crate) fn noop<const N: usize>(_: &mut SimScheduler<N>, _: WorkId) {}

/// Appends `(id, now)` to the platform's firing log.
pub(crate) fn record<const N: usize>(scheduler: &mut SimScheduler<N>, id: WorkId) {
    let now = scheduler.platform().now;
    scheduler.platform_mut().fires.push((id, now));
}

/// Every adjacent pair in the schedule is in wraparound-aware due order.
pub(crate) fn is_sorted<const N: usize>(scheduler: &SimScheduler<N>) -> bool {
    let dues: Vec<Millis> = scheduler
        .scheduled()
        .filter_map(|id| scheduler.due_at(id))
        .collect();
    dues.windows(2).all(|pair| !is_before(pair[1], pair[0]))
}
