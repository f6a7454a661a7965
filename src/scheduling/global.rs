//! A single process-wide schedule for firmware that wants the classic
//! `init` / `insert` / `remove` / `run` free-standing API.
//!
//! ```ignore
//! static SCHEDULER: GlobalScheduler<Board, 8> = GlobalScheduler::new();
//!
//! SCHEDULER.init(Board::take());
//! let blink = SCHEDULER.register(WorkUnit::new(toggle_led, 500))?;
//! SCHEDULER.insert(blink);
//! SCHEDULER.run();
//! ```
//!
//! The schedule sits behind a `critical_section::Mutex`, held only for the span of a
//! single call. `run` moves the schedule out while it runs so interrupts stay enabled
//! across sleeps; callbacks work on the `&mut Scheduler` they are handed, and any call
//! through the global while it runs fails with [`SchedError::Busy`].
use core::{cell::RefCell, mem};

use critical_section::Mutex;
use log::{debug, warn};

use crate::SchedError;

use super::{
    guard::{trap, STRICT},
    queue::Scheduler,
    unit::{WorkId, WorkUnit},
    Platform,
};

enum State<P, const N: usize> {
    Uninit,
    Ready(Scheduler<P, N>),
    Running,
}

impl<P, const N: usize> State<P, N> {
    fn unavailable(&self) -> SchedError {
        match self {
            State::Running => SchedError::Busy,
            _ => SchedError::NotInitialized,
        }
    }
}

pub struct GlobalScheduler<P, const N: usize> {
    state: Mutex<RefCell<State<P, N>>>,
}

impl<P, const N: usize> GlobalScheduler<P, N> {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(State::Uninit)),
        }
    }
}

impl<P: Platform, const N: usize> GlobalScheduler<P, N> {
    /// Create the schedule. Must happen exactly once, before anything else.
    pub fn init(&self, platform: P) {
        if let Err(err) = self.try_init(platform) {
            if STRICT {
                trap(err);
            }
            warn!("ignoring repeated scheduler init");
        }
    }

    pub fn try_init(&self, platform: P) -> Result<(), SchedError> {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            if !matches!(*state, State::Uninit) {
                return Err(SchedError::AlreadyInitialized);
            }
            *state = State::Ready(Scheduler::new(platform));
            debug!("global scheduler initialized with {} slots", N);
            Ok(())
        })
    }

    /// Run `f` on the schedule. `None` when it is unavailable and the guard is compiled out.
    pub fn with<R>(&self, f: impl FnOnce(&mut Scheduler<P, N>) -> R) -> Option<R> {
        match self.try_with(f) {
            Ok(out) => Some(out),
            Err(err) if STRICT => trap(err),
            Err(err) => {
                warn!("scheduler call dropped: {}", err);
                None
            }
        }
    }

    pub fn try_with<R>(&self, f: impl FnOnce(&mut Scheduler<P, N>) -> R) -> Result<R, SchedError> {
        critical_section::with(|cs| match &mut *self.state.borrow_ref_mut(cs) {
            State::Ready(scheduler) => Ok(f(scheduler)),
            other => Err(other.unavailable()),
        })
    }

    pub fn register(&self, unit: WorkUnit<P, N>) -> Result<WorkId, SchedError> {
        self.try_with(|scheduler| scheduler.register(unit))?
    }

    pub fn insert(&self, id: WorkId) {
        self.with(|scheduler| scheduler.insert(id));
    }

    pub fn try_insert(&self, id: WorkId) -> Result<(), SchedError> {
        self.try_with(|scheduler| scheduler.try_insert(id))?
    }

    pub fn remove(&self, id: WorkId) {
        self.with(|scheduler| scheduler.remove(id));
    }

    pub fn try_remove(&self, id: WorkId) -> Result<(), SchedError> {
        self.try_with(|scheduler| scheduler.try_remove(id))?
    }

    /// Drive the schedule until it is empty. See [`Scheduler::run`].
    pub fn run(&self) {
        if let Err(err) = self.try_run() {
            if STRICT {
                trap(err);
            }
            warn!("scheduler run skipped: {}", err);
        }
    }

    pub fn try_run(&self) -> Result<(), SchedError> {
        let mut scheduler = critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            match mem::replace(&mut *state, State::Running) {
                State::Ready(scheduler) => Ok(scheduler),
                other => {
                    let err = other.unavailable();
                    *state = other;
                    Err(err)
                }
            }
        })?;

        scheduler.run();

        critical_section::with(|cs| {
            *self.state.borrow_ref_mut(cs) = State::Ready(scheduler);
        });
        Ok(())
    }
}

impl<P, const N: usize> Default for GlobalScheduler<P, N> {
    fn default() -> Self {
        Self::new()
    }
}
