use std::time::Duration;

/// Fixed-step scheduler decoupling game steps from the frame rate.
#[derive(Debug, Clone)]
pub struct GameClock {
    interval: Duration,
    accumulated: Duration,
    running: bool,
}

impl GameClock {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
            running: false,
        }
    }

    /// Starts counting from zero.
    pub fn start(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running = false;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds `elapsed` and reports whether a step is due.
    ///
    /// Emits at most one step per call and keeps the remainder, so a late
    /// frame is caught up on the following frames.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }

        self.accumulated += elapsed;
        if self.accumulated < self.interval {
            return false;
        }

        self.accumulated -= self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::GameClock;

    const STEP: Duration = Duration::from_millis(200);

    #[test]
    fn stopped_clock_never_steps() {
        let mut clock = GameClock::new(STEP);

        assert!(!clock.advance(Duration::from_secs(5)));
    }

    #[test]
    fn steps_once_per_interval() {
        let mut clock = GameClock::new(STEP);
        clock.start();

        assert!(!clock.advance(Duration::from_millis(150)));
        assert!(clock.advance(Duration::from_millis(60)));
        assert!(!clock.advance(Duration::from_millis(150)));
        assert!(clock.advance(Duration::from_millis(40)));
    }

    #[test]
    fn backlog_drains_one_step_per_frame() {
        let mut clock = GameClock::new(STEP);
        clock.start();

        assert!(clock.advance(Duration::from_millis(450)));
        assert!(clock.advance(Duration::ZERO));
        assert!(!clock.advance(Duration::ZERO));
        assert!(clock.advance(Duration::from_millis(150)));
    }

    #[test]
    fn average_rate_matches_interval() {
        let mut clock = GameClock::new(STEP);
        clock.start();

        let steps = (0..600)
            .filter(|_| clock.advance(Duration::from_millis(16)))
            .count();

        // 600 frames of 16 ms is 9.6 s.
        assert_eq!(steps, 48);
    }

    #[test]
    fn restart_discards_accumulated_time() {
        let mut clock = GameClock::new(STEP);
        clock.start();
        assert!(!clock.advance(Duration::from_millis(190)));

        clock.stop();
        clock.start();

        assert!(!clock.advance(Duration::from_millis(20)));
    }
}
