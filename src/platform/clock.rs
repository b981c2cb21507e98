//! Clocks: a sleeping wall-clock pacer and a simulated one

use std::time::{Duration, Instant};

use super::Clock;
use crate::error::PlatformError;

/// Wall-clock pacer: sleeps away whatever is left of each tick's budget
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    frame: Duration,
}

impl FrameClock {
    pub fn new(tick_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame: Duration::from_secs(1) / tick_rate.max(1),
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

impl Clock for FrameClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn wait_for_next_tick(&mut self) -> Result<(), PlatformError> {
        let elapsed = self.last_tick.elapsed();
        if let Some(remaining) = self.frame.checked_sub(elapsed) {
            std::thread::sleep(remaining);
        } else {
            log::trace!("Tick overran budget by {:?}", elapsed - self.frame);
        }
        self.last_tick = Instant::now();
        Ok(())
    }
}

/// Deterministic clock: each wait advances time by one tick without sleeping
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    now_ms: u64,
    tick_ms: u64,
}

impl SimulatedClock {
    pub fn new(tick_rate: u32) -> Self {
        Self::with_tick_ms((1000 / u64::from(tick_rate.max(1))).max(1))
    }

    pub fn with_tick_ms(tick_ms: u64) -> Self {
        Self { now_ms: 0, tick_ms }
    }
}

impl Clock for SimulatedClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn wait_for_next_tick(&mut self) -> Result<(), PlatformError> {
        self.now_ms += self.tick_ms;
        Ok(())
    }
}
