use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::frontend::Pacer;

pub fn frame_interval(rate: u32) -> Duration {
    Duration::from_secs(1) / rate.max(1)
}

/// Sleeps so that consecutive ticks start one interval apart.
pub struct FramePacer {
    last: Instant,
}

impl FramePacer {
    pub fn new() -> Self {
        FramePacer { last: Instant::now() }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer for FramePacer {
    fn wait_for_tick(&mut self, rate: u32) {
        let target = self.last + frame_interval(rate);
        let now = Instant::now();
        if target > now {
            sleep(target - now);
            self.last = target;
        } else {
            // Running late; don't try to catch up.
            self.last = now;
        }
    }

    fn hold(&mut self, duration: Duration) {
        sleep(duration);
        self.last = Instant::now();
    }
}
