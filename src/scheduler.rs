use std::time::Duration;

/// Gates snake movement on a fixed interval that shrinks as food is eaten.
///
/// Elapsed frame time accumulates until it strictly exceeds the current
/// interval; then one step is due and the accumulator restarts from zero.
/// Leftover time is dropped, so a long frame never yields more than one step.
#[derive(Debug, Clone)]
pub struct MoveScheduler {
    base: Duration,
    floor: Duration,
    decrement: Duration,
    interval: Duration,
    elapsed: Duration,
}

impl MoveScheduler {
    pub fn new(base: Duration, floor: Duration, decrement: Duration) -> Self {
        let floor = floor.min(base);
        Self {
            base,
            floor,
            decrement,
            interval: base,
            elapsed: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds `dt` and reports whether a step is due.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    /// Shortens the interval by one decrement, never below the floor.
    pub fn accelerate(&mut self) {
        self.interval = self.interval.saturating_sub(self.decrement).max(self.floor);
    }

    pub fn reset(&mut self) {
        self.interval = self.base;
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_step_only_after_interval_exceeded() {
        let mut scheduler = MoveScheduler::new(ms(140), ms(70), ms(3));
        assert!(!scheduler.tick(ms(100)));
        assert!(!scheduler.tick(ms(40)));
        assert!(scheduler.tick(ms(1)));
        assert!(!scheduler.tick(ms(16)));
    }

    #[test]
    fn test_no_catch_up_after_long_frame() {
        let mut scheduler = MoveScheduler::new(ms(100), ms(50), ms(5));
        assert!(scheduler.tick(ms(1_000)));
        assert!(!scheduler.tick(ms(10)));
    }

    #[test]
    fn test_accelerate_clamps_to_floor() {
        let mut scheduler = MoveScheduler::new(ms(140), ms(70), ms(3));
        scheduler.accelerate();
        assert_eq!(scheduler.interval(), ms(137));
        for _ in 0..100 {
            scheduler.accelerate();
        }
        assert_eq!(scheduler.interval(), ms(70));
    }

    #[test]
    fn test_reset_restores_base() {
        let mut scheduler = MoveScheduler::new(ms(140), ms(60), ms(6));
        scheduler.accelerate();
        scheduler.tick(ms(50));
        scheduler.reset();
        assert_eq!(scheduler.interval(), ms(140));
        assert!(!scheduler.tick(ms(140)));
    }
}
