//! Fixed-period tick scheduling
//!
//! Hosts call `advance` with the wall-clock time since their last frame and
//! run the returned number of ticks. Backlog beyond the substep cap is
//! dropped so a stalled tab doesn't fast-forward the game.

use crate::consts::MAX_SUBSTEPS;

#[derive(Debug, Clone)]
pub struct Ticker {
    period_ms: f64,
    accumulator_ms: f64,
    max_substeps: u32,
}

impl Ticker {
    /// Periods below 1 ms are clamped to 1 ms
    pub fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1) as f64,
            accumulator_ms: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Accumulate elapsed time and return how many ticks are due
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        self.accumulator_ms += elapsed_ms.max(0.0);

        let mut due = 0;
        while self.accumulator_ms >= self.period_ms && due < self.max_substeps {
            self.accumulator_ms -= self.period_ms;
            due += 1;
        }
        if due == self.max_substeps && self.accumulator_ms >= self.period_ms {
            log::warn!(
                "Dropping {:.0} ms of tick backlog",
                self.accumulator_ms
            );
            self.accumulator_ms %= self.period_ms;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_partial_frames() {
        let mut ticker = Ticker::new(50);
        assert_eq!(ticker.advance(16.0), 0);
        assert_eq!(ticker.advance(16.0), 0);
        assert_eq!(ticker.advance(20.0), 1);
        assert_eq!(ticker.advance(100.0), 2);
    }

    #[test]
    fn test_caps_substeps() {
        let mut ticker = Ticker::new(50);
        assert_eq!(ticker.advance(10_000.0), MAX_SUBSTEPS);
        assert_eq!(ticker.advance(0.0), 0);
    }

    #[test]
    fn test_zero_period_keeps_ticking() {
        let mut ticker = Ticker::new(0);
        assert_eq!(ticker.advance(3.0), 3);
        assert_eq!(ticker.advance(2.5), 2);
        assert_eq!(ticker.advance(100.0), MAX_SUBSTEPS);
        assert_eq!(ticker.advance(1.0), 1);
    }
}
