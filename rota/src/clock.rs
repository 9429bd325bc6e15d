use std::time::Duration;

/// Converts elapsed host time into whole ticks of a fixed interval.
///
/// The remainder carries over between calls, so feeding 30 ms three times and
/// 10 ms once yields exactly one 100 ms tick. A stopped ticker swallows time.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    accumulator: Duration,
    running: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            running: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        tracing::debug!(target: "clock", interval_ms = self.interval.as_millis() as u64, "ticker started");
        self.running = true;
    }

    /// Stops ticking and drops any partially accumulated interval.
    pub fn stop(&mut self) {
        tracing::debug!(target: "clock", "ticker stopped");
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    pub fn accumulate(&mut self, delta: Duration) {
        if self.running {
            self.accumulator += delta;
        }
    }

    pub fn should_step(&mut self) -> bool {
        if self.running && self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }

    /// Accumulates `delta` and returns how many ticks are now due.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulate(delta);
        let mut ticks = 0;
        while self.should_step() {
            ticks += 1;
        }
        if ticks > 0 {
            tracing::trace!(target: "clock", ticks, "ticks due");
        }
        ticks
    }
}
