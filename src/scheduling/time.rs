//! Wraparound-aware arithmetic over the 32-bit millisecond counter.
//!
//! Two timestamps are ordered by their wrapping distance. Anything within half the
//! counter's range of each other compares correctly, even across the overflow point
//! (roughly every 49.7 days). Beyond that distance the answer is meaningless.

/// Absolute clock value in milliseconds.
pub type Millis = u32;

/// Requested interval between firings, in milliseconds.
pub type Period = u16;

/// Longest single sleep the run loop will ever request.
pub const MAX_SLEEP: Millis = Period::MAX as Millis;

const HALF_RANGE: Millis = Millis::MAX / 2;

/// `true` iff `a` is strictly earlier than `b`.
#[inline]
pub const fn is_before(a: Millis, b: Millis) -> bool {
    b.wrapping_sub(a).wrapping_sub(1) < HALF_RANGE
}

/// Wrapping distance from `now` to `due`. Already-due times come out as huge values.
#[inline]
pub const fn until(now: Millis, due: Millis) -> Millis {
    due.wrapping_sub(now)
}

/// Due time of something armed at `now` with `period`.
#[inline]
pub const fn deadline(now: Millis, period: Period) -> Millis {
    now.wrapping_add(period as Millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_times_are_not_before() {
        assert!(!is_before(0, 0));
        assert!(!is_before(Millis::MAX, Millis::MAX));
        assert!(!is_before(12345, 12345));
    }

    #[test]
    fn plain_ordering() {
        assert!(is_before(0, 20));
        assert!(!is_before(20, 0));
        assert!(is_before(1, 2));
    }

    #[test]
    fn ordering_across_wraparound() {
        let late = 0u32.wrapping_sub(10);
        assert!(is_before(late, 10));
        assert!(!is_before(10, late));
        assert!(is_before(Millis::MAX, 0));
        assert!(!is_before(0, Millis::MAX));
    }

    #[test]
    fn half_range_boundary() {
        assert!(is_before(0, HALF_RANGE));
        assert!(!is_before(0, HALF_RANGE + 1));
    }

    #[test]
    fn wait_interval() {
        assert_eq!(until(10, 15), 5);
        assert_eq!(until(15, 15), 0);
        assert_eq!(until(0u32.wrapping_sub(3), 2), 5);
        // overdue
        assert!(until(16, 15) > MAX_SLEEP);
    }

    #[test]
    fn deadline_wraps() {
        assert_eq!(deadline(Millis::MAX - 49, 50), 0);
        assert_eq!(deadline(100, Period::MAX), 100 + 65535);
    }
}
