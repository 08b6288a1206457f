//! One-way reveal flags for elements scrolled into view.

/// Slack allowed below a threshold; observers report crossing ratios with
/// rounding error.
const RATIO_TOLERANCE: f64 = 1e-3;

/// What an intersection observer reported for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSample {
    pub is_intersecting: bool,
    /// Visible fraction of the element, in `[0, 1]`.
    pub ratio: f64,
}

impl IntersectionSample {
    #[must_use]
    pub const fn new(is_intersecting: bool, ratio: f64) -> Self {
        Self {
            is_intersecting,
            ratio,
        }
    }

    /// Whether this sample satisfies `threshold`.
    #[must_use]
    pub fn meets(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio + RATIO_TOLERANCE >= threshold
    }
}

/// Tracks which observed elements have been revealed.
///
/// Flags only ever go from hidden to visible.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    revealed: Vec<bool>,
}

impl RevealTracker {
    #[must_use]
    pub fn new(len: usize, threshold: f64) -> Self {
        Self {
            threshold,
            revealed: vec![false; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.revealed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.revealed.is_empty()
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|flag| **flag).count()
    }

    /// Feed a sample for element `index`.
    ///
    /// Returns `true` only for the sample that first reveals the element.
    pub fn record(&mut self, index: usize, sample: IntersectionSample) -> bool {
        let Some(flag) = self.revealed.get_mut(index) else {
            return false;
        };
        if *flag || !sample.meets(self.threshold) {
            return false;
        }
        *flag = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_once_and_never_reverts() {
        let mut tracker = RevealTracker::new(2, 0.12);
        assert!(!tracker.record(0, IntersectionSample::new(true, 0.05)));
        assert!(tracker.record(0, IntersectionSample::new(true, 0.2)));
        assert!(!tracker.record(0, IntersectionSample::new(true, 0.9)));
        assert!(!tracker.record(0, IntersectionSample::new(false, 0.0)));
        assert!(tracker.is_revealed(0));
        assert!(!tracker.is_revealed(1));
        assert_eq!(tracker.revealed_count(), 1);
    }

    #[test]
    fn not_intersecting_never_reveals() {
        let mut tracker = RevealTracker::new(1, 0.12);
        assert!(!tracker.record(0, IntersectionSample::new(false, 1.0)));
        assert!(!tracker.is_revealed(0));
    }

    #[test]
    fn threshold_crossing_tolerates_rounding() {
        let sample = IntersectionSample::new(true, 0.1199);
        assert!(sample.meets(0.12));
        assert!(!IntersectionSample::new(true, 0.1).meets(0.12));
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut tracker = RevealTracker::new(1, 0.12);
        assert!(!tracker.record(3, IntersectionSample::new(true, 1.0)));
    }
}
