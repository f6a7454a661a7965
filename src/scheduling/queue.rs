//! Due-time ordered schedule of work units.
//!
//! Units sit in a fixed arena of `N` slots and are chained by index from a sentinel
//! head, earliest due first. Ties keep insertion order. Nothing here allocates.
//!
//! Insertion remembers the tail it last appended and the period that put it there.
//! A later unit whose period is at least that large cannot be due before the tail,
//! so its scan starts at the tail instead of the sentinel. Workloads made of many
//! units sharing one interval therefore insert in O(1); everything else falls back
//! to a scan from the head.
use log::{debug, trace};

use crate::SchedError;

use super::{
    guard::{trap, STRICT},
    time::{self, Millis, Period},
    unit::{WorkId, WorkUnit},
    Platform,
};

/// A position in the chain: the sentinel in front of every unit, or a unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Link {
    Sentinel,
    Unit(WorkId),
}

/// Tail insertion hint. `node` is always the last position in the chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Hint {
    pub(crate) node: Link,
    pub(crate) period: Period,
}

impl Hint {
    const RESET: Hint = Hint {
        node: Link::Sentinel,
        period: 0,
    };
}

/// Cooperative scheduler over a platform `P` with room for `N` work units.
pub struct Scheduler<P, const N: usize> {
    pub(crate) units: [Option<WorkUnit<P, N>>; N],
    /// The sentinel's link; `None` when the schedule is empty.
    pub(crate) head: Option<WorkId>,
    pub(crate) hint: Hint,
    pub(crate) platform: P,
    /// Nodes stepped over by insertion scans.
    #[cfg(test)]
    pub(crate) scan_steps: usize,
}

impl<P: Platform, const N: usize> Scheduler<P, N> {
    /// An empty schedule on `platform`.
    pub fn new(platform: P) -> Self {
        Self {
            units: array_init::array_init(|_| None),
            head: None,
            hint: Hint::RESET,
            platform,
            #[cfg(test)]
            scan_steps: 0,
        }
    }

    /// Store `unit` in a free slot. It is not scheduled until inserted.
    pub fn register(&mut self, mut unit: WorkUnit<P, N>) -> Result<WorkId, SchedError> {
        let index = self
            .units
            .iter()
            .position(Option::is_none)
            .ok_or(SchedError::CapacityExhausted(N))?;
        unit.next = None;
        self.units[index] = Some(unit);
        debug!("registered work unit {index}");
        Ok(WorkId(index))
    }

    /// Take a unit back out of its slot. It must not be scheduled.
    pub fn release(&mut self, id: WorkId) -> Result<WorkUnit<P, N>, SchedError> {
        self.unit(id)?;
        if self.is_scheduled(id) {
            return Err(SchedError::StillScheduled(id.0));
        }
        debug!("released work unit {}", id.0);
        self.units[id.0]
            .take()
            .ok_or(SchedError::UnknownUnit(id.0))
    }

    pub fn unit(&self, id: WorkId) -> Result<&WorkUnit<P, N>, SchedError> {
        self.units
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(SchedError::UnknownUnit(id.0))
    }

    pub fn unit_mut(&mut self, id: WorkId) -> Result<&mut WorkUnit<P, N>, SchedError> {
        self.units
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(SchedError::UnknownUnit(id.0))
    }

    /// Schedule `id` to fire `period` milliseconds from now.
    ///
    /// Inserting a unit that is already scheduled, unregistered, or has no callback is a
    /// programmer error. With the invariant guard compiled in this traps; without it the
    /// outcome is unspecified.
    pub fn insert(&mut self, id: WorkId) {
        if STRICT {
            if let Err(err) = self.check_insert(id) {
                trap(err);
            }
        }
        self.link(id);
    }

    /// Checked [`insert`](Self::insert) that reports misuse instead of trapping.
    pub fn try_insert(&mut self, id: WorkId) -> Result<(), SchedError> {
        self.check_insert(id)?;
        self.link(id);
        Ok(())
    }

    /// Take `id` out of the schedule. Removing a unit that is not scheduled is a
    /// programmer error, trapped by the invariant guard when compiled in.
    pub fn remove(&mut self, id: WorkId) {
        if STRICT {
            if let Err(err) = self.check_remove(id) {
                trap(err);
            }
        }
        self.unlink(id);
    }

    /// Checked [`remove`](Self::remove) that reports misuse instead of trapping.
    pub fn try_remove(&mut self, id: WorkId) -> Result<(), SchedError> {
        self.check_remove(id)?;
        self.unlink(id);
        Ok(())
    }

    /// Scheduled units, earliest due first.
    pub fn scheduled(&self) -> impl Iterator<Item = WorkId> + '_ {
        core::iter::successors(self.head, move |&id| self.next_of(Link::Unit(id)))
    }

    /// Number of scheduled units. Walks the chain.
    pub fn len(&self) -> usize {
        self.scheduled().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn is_scheduled(&self, id: WorkId) -> bool {
        self.predecessor(id).is_some()
    }

    /// Due time of `id`, if it is scheduled.
    pub fn due_at(&self, id: WorkId) -> Option<Millis> {
        if self.is_scheduled(id) {
            Some(self.due(id))
        } else {
            None
        }
    }

    /// Due time of the earliest scheduled unit.
    pub fn next_due(&self) -> Option<Millis> {
        self.head.map(|id| self.due(id))
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub(crate) fn due(&self, id: WorkId) -> Millis {
        self.units[id.0].as_ref().map_or(0, |unit| unit.due_at)
    }

    pub(crate) fn next_of(&self, link: Link) -> Option<WorkId> {
        match link {
            Link::Sentinel => self.head,
            Link::Unit(id) => self.units[id.0].as_ref().and_then(|unit| unit.next),
        }
    }

    fn set_next(&mut self, link: Link, next: Option<WorkId>) {
        match link {
            Link::Sentinel => self.head = next,
            Link::Unit(id) => {
                if let Some(unit) = self.units[id.0].as_mut() {
                    unit.next = next;
                }
            }
        }
    }

    /// Position whose link points at `id`. Scans from the sentinel.
    pub(crate) fn predecessor(&self, id: WorkId) -> Option<Link> {
        let mut earlier = Link::Sentinel;
        loop {
            let later = self.next_of(earlier)?;
            if later == id {
                return Some(earlier);
            }
            earlier = Link::Unit(later);
        }
    }

    /// Where an insertion with `period` starts scanning: the tail when the unit cannot
    /// be due before it, the sentinel otherwise.
    pub(crate) fn scan_start(&self, period: Period) -> Link {
        if period >= self.hint.period {
            self.hint.node
        } else {
            Link::Sentinel
        }
    }

    pub(crate) fn link(&mut self, id: WorkId) {
        let now = self.platform.now();
        let Some(unit) = self.units.get_mut(id.0).and_then(Option::as_mut) else {
            return;
        };
        let period = unit.period;
        let due_at = time::deadline(now, period);
        unit.due_at = due_at;

        let mut earlier = self.scan_start(period);
        let mut later = self.next_of(earlier);
        // Step over everything not strictly after the new unit so equal due times stay FIFO.
        while let Some(candidate) = later {
            if time::is_before(due_at, self.due(candidate)) {
                break;
            }
            earlier = Link::Unit(candidate);
            later = self.next_of(earlier);
            #[cfg(test)]
            {
                self.scan_steps += 1;
            }
        }

        self.set_next(earlier, Some(id));
        self.set_next(Link::Unit(id), later);
        if later.is_none() {
            self.hint = Hint {
                node: Link::Unit(id),
                period,
            };
        }
        trace!("inserted work unit {} due at {due_at}", id.0);
    }

    pub(crate) fn unlink(&mut self, id: WorkId) {
        let Some(earlier) = self.predecessor(id) else {
            return;
        };
        let later = self.next_of(Link::Unit(id));
        self.set_next(earlier, later);
        self.set_next(Link::Unit(id), None);
        if self.hint.node == Link::Unit(id) {
            self.hint.node = earlier;
        }
        trace!("removed work unit {}", id.0);
    }
}
