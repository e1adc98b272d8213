//! Range enumeration
//!
//! Expands `(start, end, step)` descriptors into ordered, finite value
//! sequences. Degenerate inputs never error: a non-positive step or an
//! inverted range collapses to the single-value sequence `[start]`, because
//! the host expects some value on every invocation.

/// Epsilon absorbing floating-point drift when counting steps
const STEP_EPSILON: f64 = 1e-9;

/// A float range descriptor: `start, start+step, ..., <= end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatRange {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl FloatRange {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self { start, end, step }
    }

    /// Number of values the range enumerates: `floor((end-start)/step) + 1`,
    /// minimum 1
    pub fn len(&self) -> usize {
        if self.step <= 0.0 || self.end < self.start {
            return 1;
        }
        ((self.end - self.start) / self.step + STEP_EPSILON).floor() as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false // a range always enumerates at least `[start]`
    }

    /// Enumerate the range into an ordered sequence.
    ///
    /// Values are computed as `start + i*step` rather than by repeated
    /// addition, so long ranges do not accumulate drift. The final value is
    /// clamped to not exceed `end`.
    pub fn values(&self) -> Vec<f64> {
        if self.step <= 0.0 || self.end < self.start {
            return vec![self.start];
        }

        (0..self.len())
            .map(|i| (self.start + i as f64 * self.step).min(self.end))
            .collect()
    }
}

/// An integer range descriptor: `start, start+step, ..., <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl IntRange {
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self { start, end, step }
    }

    /// Number of values the range enumerates, minimum 1
    pub fn len(&self) -> usize {
        if self.step <= 0 || self.end < self.start {
            return 1;
        }
        ((self.end - self.start) / self.step) as usize + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Enumerate the range into an ordered sequence
    pub fn values(&self) -> Vec<i64> {
        if self.step <= 0 || self.end < self.start {
            return vec![self.start];
        }

        (0..self.len()).map(|i| self.start + i as i64 * self.step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_range_basic() {
        let values = FloatRange::new(1.0, 3.0, 0.5).values();
        assert_eq!(values, vec![1.0, 1.5, 2.0, 2.5, 3.0]);
    }

    #[test]
    fn test_float_range_length_formula() {
        // length = floor((end-start)/step) + 1
        let range = FloatRange::new(0.0, 10.0, 1.0);
        assert_eq!(range.len(), 11);
        assert_eq!(range.values().len(), 11);
    }

    #[test]
    fn test_float_range_first_and_last() {
        let values = FloatRange::new(1.0, 8.0, 1.0).values();
        assert_eq!(values[0], 1.0);
        assert!(*values.last().unwrap() <= 8.0);
    }

    #[test]
    fn test_float_range_consecutive_differences() {
        let values = FloatRange::new(1.0, 3.0, 0.1).values();
        for pair in values.windows(2) {
            assert!((pair[1] - pair[0] - 0.1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_float_range_step_not_dividing_evenly() {
        // 1.0, 1.7, 2.4; the next step would exceed end
        let values = FloatRange::new(1.0, 2.5, 0.7).values();
        assert_eq!(values.len(), 3);
        assert!((values[2] - 2.4).abs() < 1e-9);
    }

    #[test]
    fn test_float_range_drift_absorbed() {
        // 0.1 is not exactly representable; epsilon keeps the endpoint in
        let values = FloatRange::new(0.0, 0.3, 0.1).values();
        assert_eq!(values.len(), 4);
        assert!(*values.last().unwrap() <= 0.3);
    }

    #[test]
    fn test_float_range_end_before_start() {
        assert_eq!(FloatRange::new(5.0, 1.0, 1.0).values(), vec![5.0]);
    }

    #[test]
    fn test_float_range_zero_step() {
        assert_eq!(FloatRange::new(2.0, 4.0, 0.0).values(), vec![2.0]);
    }

    #[test]
    fn test_float_range_negative_step() {
        assert_eq!(FloatRange::new(2.0, 4.0, -0.5).values(), vec![2.0]);
    }

    #[test]
    fn test_float_range_single_point() {
        assert_eq!(FloatRange::new(3.0, 3.0, 1.0).values(), vec![3.0]);
    }

    #[test]
    fn test_float_range_never_empty() {
        assert!(!FloatRange::new(5.0, 1.0, -1.0).is_empty());
        assert_eq!(FloatRange::new(5.0, 1.0, -1.0).len(), 1);
    }

    #[test]
    fn test_int_range_basic() {
        let values = IntRange::new(20, 50, 10).values();
        assert_eq!(values, vec![20, 30, 40, 50]);
    }

    #[test]
    fn test_int_range_step_not_dividing_evenly() {
        let values = IntRange::new(20, 50, 7).values();
        assert_eq!(values, vec![20, 27, 34, 41, 48]);
    }

    #[test]
    fn test_int_range_end_before_start() {
        assert_eq!(IntRange::new(50, 20, 5).values(), vec![50]);
    }

    #[test]
    fn test_int_range_zero_step() {
        assert_eq!(IntRange::new(20, 50, 0).values(), vec![20]);
    }

    #[test]
    fn test_int_range_single_point() {
        assert_eq!(IntRange::new(30, 30, 5).values(), vec![30]);
    }

    #[test]
    fn test_int_range_len_matches_values() {
        let range = IntRange::new(1, 1000, 3);
        assert_eq!(range.len(), range.values().len());
    }
}
