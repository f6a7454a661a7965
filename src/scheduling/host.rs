//! Platform for running a schedule on a hosted OS.
use std::time::{Duration, Instant};

use super::{time::Millis, Platform};

/// Wall-clock platform. The counter starts at zero on construction and wraps
/// like a device millisecond counter would.
#[derive(Debug, Clone, Copy)]
pub struct HostPlatform {
    epoch: Instant,
}

impl HostPlatform {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for HostPlatform {
    fn now(&self) -> Millis {
        // truncation is the wraparound
        self.epoch.elapsed().as_millis() as Millis
    }

    fn sleep_for(&mut self, duration: Millis) {
        std::thread::sleep(Duration::from_millis(duration.into()));
    }
}
