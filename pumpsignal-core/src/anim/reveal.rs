//! Staggered card reveal: card `i` shows once `i * stagger` has elapsed since
//! the last reset (a set replacement or a filter switch).

use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RevealClock {
    stagger: Duration,
    started_at: Duration,
}

impl RevealClock {
    pub fn new(stagger: Duration) -> Self {
        Self {
            stagger,
            started_at: Duration::ZERO,
        }
    }

    pub fn reset(&mut self, now: Duration) {
        self.started_at = now;
    }

    /// How many of `total` cards are visible at `now`.
    pub fn visible_count(&self, total: usize, now: Duration) -> usize {
        if self.stagger.is_zero() {
            return total;
        }
        let elapsed = now.saturating_sub(self.started_at);
        let revealed = (elapsed.as_nanos() / self.stagger.as_nanos()) as usize + 1;
        revealed.min(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_card_is_immediate() {
        let clock = RevealClock::new(Duration::from_millis(100));
        assert_eq!(clock.visible_count(6, Duration::ZERO), 1);
        assert_eq!(clock.visible_count(6, Duration::from_millis(99)), 1);
        assert_eq!(clock.visible_count(6, Duration::from_millis(100)), 2);
    }

    #[test]
    fn visible_count_tracks_elapsed() {
        let mut clock = RevealClock::new(Duration::from_millis(100));
        clock.reset(Duration::from_secs(5));
        let at = |ms| Duration::from_secs(5) + Duration::from_millis(ms);
        assert_eq!(clock.visible_count(6, at(0)), 1);
        assert_eq!(clock.visible_count(6, at(250)), 3);
        assert_eq!(clock.visible_count(6, at(10_000)), 6);
        assert_eq!(clock.visible_count(0, at(10_000)), 0);
    }

    #[test]
    fn zero_stagger_shows_everything() {
        let clock = RevealClock::new(Duration::ZERO);
        assert_eq!(clock.visible_count(4, Duration::ZERO), 4);
    }
}
