/// Shortest accepted period.
pub const MIN_PERIOD_MS: f64 = 1.0;

/// Repeating timer driven by elapsed wall time.
///
/// Mirrors `setInterval`: the first fire happens one full period after
/// `start`, and a stopped timer never fires. Unlike a fixed-step accumulator
/// it fires at most once per `advance` call; periods missed while the page
/// was throttled are dropped instead of replayed in a burst.
#[derive(Debug, Clone)]
pub struct Interval {
    /// Period in milliseconds.
    period: f64,
    /// Time accumulated since the last fire.
    elapsed: f64,
    running: bool,
}

impl Interval {
    /// Create a stopped timer. Periods below 1ms (or NaN) are raised to 1ms.
    pub fn new(period_ms: f64) -> Self {
        Self {
            period: period_ms.max(MIN_PERIOD_MS),
            elapsed: 0.0,
            running: false,
        }
    }

    /// (Re)start the timer. The phase is reset.
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Add elapsed time. Returns `true` if the timer fired.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if !self.running || dt_ms <= 0.0 {
            return false;
        }
        self.elapsed += dt_ms;
        if self.elapsed < self.period {
            return false;
        }
        // Keep the phase, discard whole periods beyond the first.
        self.elapsed = (self.elapsed - self.period) % self.period;
        true
    }

    /// The period in milliseconds.
    pub fn period(&self) -> f64 {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_timer_never_fires() {
        let mut t = Interval::new(100.0);
        assert!(!t.advance(1000.0));
    }

    #[test]
    fn fires_once_per_period() {
        let mut t = Interval::new(100.0);
        t.start();
        assert!(!t.advance(60.0));
        assert!(t.advance(40.0));
        assert!(!t.advance(99.0));
        assert!(t.advance(1.0));
    }

    #[test]
    fn long_stall_fires_once() {
        let mut t = Interval::new(100.0);
        t.start();
        assert!(t.advance(1050.0));
        // 50ms of phase carried over, not ten queued fires.
        assert!(!t.advance(40.0));
        assert!(t.advance(10.0));
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut t = Interval::new(0.0);
        assert_eq!(t.period(), MIN_PERIOD_MS);
        t.start();
        assert!(!t.advance(0.5));
        assert!(t.advance(0.5));
        assert!(!t.advance(0.25));

        assert_eq!(Interval::new(f64::NAN).period(), MIN_PERIOD_MS);
    }

    #[test]
    fn restart_resets_phase() {
        let mut t = Interval::new(200.0);
        t.start();
        t.advance(150.0);
        t.stop();
        assert!(!t.is_running());
        t.start();
        assert!(!t.advance(150.0));
        assert!(t.advance(50.0));
    }
}
