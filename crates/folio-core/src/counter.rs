//! Eased count-up animation for numeric highlights.

use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::reveal::IntersectionSample;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CounterError {
    #[error("counter target {0:?} is not a non-negative integer")]
    InvalidTarget(String),
}

/// Cubic ease-out: `1 - (1 - t)^3`, with `t` clamped to `[0, 1]`.
#[must_use]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    1.0 - (1.0 - t).powi(3)
}

/// One counter's animation from zero to its target.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u64,
    duration: Duration,
    suffix: String,
}

impl CounterAnimation {
    #[must_use]
    pub fn new(target: u64, duration: Duration, suffix: impl Into<String>) -> Self {
        Self {
            target,
            duration,
            suffix: suffix.into(),
        }
    }

    /// Build from the raw attribute text of a counter element.
    pub fn from_attribute(
        raw: &str,
        duration: Duration,
        suffix: impl Into<String>,
    ) -> Result<Self, CounterError> {
        let target = raw
            .trim()
            .parse::<u64>()
            .map_err(|_| CounterError::InvalidTarget(raw.to_string()))?;
        Ok(Self::new(target, duration, suffix))
    }

    #[must_use]
    pub const fn target(&self) -> u64 {
        self.target
    }

    /// Progress in `[0, 1]` after `elapsed`.
    #[must_use]
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Displayed integer after `elapsed`, rounded down.
    #[must_use]
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        let progress = self.progress(elapsed);
        if progress >= 1.0 {
            return self.target;
        }
        let value = (self.target as f64 * ease_out_cubic(progress)).floor() as u64;
        value.min(self.target)
    }

    /// Text shown after `elapsed`, e.g. `"150+"`.
    #[must_use]
    pub fn label_at(&self, elapsed: Duration) -> String {
        format!("{}{}", self.value_at(elapsed), self.suffix)
    }

    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Hands out each counter's animation exactly once, the first time its
/// element is seen at or above the visibility threshold.
#[derive(Debug, Clone)]
pub struct CounterTrigger {
    threshold: f64,
    pending: Vec<Option<CounterAnimation>>,
}

impl CounterTrigger {
    #[must_use]
    pub fn new(threshold: f64, counters: Vec<CounterAnimation>) -> Self {
        Self {
            threshold,
            pending: counters.into_iter().map(Some).collect(),
        }
    }

    /// Parse raw attribute values, dropping unparseable ones.
    ///
    /// Returns the trigger plus the positions in `raw` that were kept, so the
    /// caller can line its elements up with the trigger's indices.
    pub fn from_attributes<'a>(
        threshold: f64,
        raw: impl IntoIterator<Item = &'a str>,
        duration: Duration,
        suffix: &str,
    ) -> (Self, Vec<usize>) {
        let mut kept = Vec::new();
        let mut counters = Vec::new();
        for (position, value) in raw.into_iter().enumerate() {
            match CounterAnimation::from_attribute(value, duration, suffix) {
                Ok(counter) => {
                    kept.push(position);
                    counters.push(counter);
                }
                Err(err) => warn!(%err, "skipping counter"),
            }
        }
        (Self::new(threshold, counters), kept)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Counters that have not started yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.iter().filter(|slot| slot.is_some()).count()
    }

    /// Feed a sample for counter `index`; yields its animation on first trigger.
    pub fn fire(&mut self, index: usize, sample: IntersectionSample) -> Option<CounterAnimation> {
        if !sample.meets(self.threshold) {
            return None;
        }
        self.pending.get_mut(index)?.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(target: u64) -> CounterAnimation {
        CounterAnimation::new(target, Duration::from_millis(1_800), "+")
    }

    #[test]
    fn easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert_eq!(ease_out_cubic(f64::NAN), 0.0);
    }

    #[test]
    fn value_is_monotonic() {
        let counter = counter(1_000);
        let mut last = 0;
        for ms in (0..=1_800).step_by(30) {
            let value = counter.value_at(Duration::from_millis(ms));
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, 1_000);
    }

    #[test]
    fn halfway_is_front_loaded() {
        assert_eq!(counter(1_000).value_at(Duration::from_millis(900)), 875);
    }

    #[test]
    fn overshooting_time_holds_target() {
        let counter = counter(42);
        assert_eq!(counter.label_at(Duration::from_secs(10)), "42+");
        assert!(counter.is_finished(Duration::from_secs(10)));
        assert!(!counter.is_finished(Duration::from_millis(1_799)));
    }

    #[test]
    fn parses_attribute_targets() {
        let parsed = CounterAnimation::from_attribute(" 25 ", Duration::from_millis(10), "+")
            .expect("numeric");
        assert_eq!(parsed.target(), 25);
        assert_eq!(
            CounterAnimation::from_attribute("lots", Duration::from_millis(10), "+"),
            Err(CounterError::InvalidTarget("lots".to_string()))
        );
    }

    #[test]
    fn trigger_fires_once_at_half_visibility() {
        let mut trigger = CounterTrigger::new(0.5, vec![counter(150), counter(30)]);
        assert_eq!(trigger.fire(0, IntersectionSample::new(true, 0.3)), None);
        assert_eq!(trigger.fire(0, IntersectionSample::new(false, 0.0)), None);
        let fired = trigger.fire(0, IntersectionSample::new(true, 0.5)).expect("fires");
        assert_eq!(fired.target(), 150);
        assert_eq!(trigger.fire(0, IntersectionSample::new(true, 1.0)), None);
        assert_eq!(trigger.remaining(), 1);
        assert_eq!(trigger.fire(9, IntersectionSample::new(true, 1.0)), None);
    }

    #[test]
    fn unparseable_targets_are_skipped() {
        let (mut trigger, kept) = CounterTrigger::from_attributes(
            0.5,
            ["12", "", "many", "7"],
            Duration::from_millis(1_800),
            "+",
        );
        assert_eq!(kept, vec![0, 3]);
        assert_eq!(trigger.len(), 2);
        let second = trigger.fire(1, IntersectionSample::new(true, 0.9)).expect("fires");
        assert_eq!(second.target(), 7);
    }
}
