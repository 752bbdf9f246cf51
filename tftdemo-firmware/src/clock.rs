//! Board clocks backed by the embassy time driver
//!
//! There is no RTC or network time on the board: wall-clock time is the
//! configured start time plus uptime.

use embassy_time::Instant;
use tftdemo_hal::{Monotonic, WallClock, WallTime};

/// Wall clock counting up from a fixed time of day at boot
pub struct UptimeWallClock {
    start: WallTime,
    boot: Instant,
}

impl UptimeWallClock {
    pub fn new(start: WallTime) -> Self {
        Self {
            start,
            boot: Instant::now(),
        }
    }
}

impl WallClock for UptimeWallClock {
    fn now(&self) -> WallTime {
        self.start.plus_secs(self.boot.elapsed().as_secs())
    }
}

/// Milliseconds since boot
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyMonotonic;

impl Monotonic for EmbassyMonotonic {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
