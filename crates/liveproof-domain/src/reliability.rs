//! Reliability threshold shared by the client gate and its tests.

/// Minimum reliability score at which artifact generation is permitted.
///
/// The verification service applies the same constant; any drift between
/// the two is a correctness defect.
pub const RELIABILITY_THRESHOLD: f64 = 0.65;

/// Check whether a reliability score clears a threshold.
///
/// NaN never clears the threshold.
///
/// # Examples
///
/// ```
/// use liveproof_domain::{meets_threshold, RELIABILITY_THRESHOLD};
///
/// assert!(meets_threshold(0.65, RELIABILITY_THRESHOLD));
/// assert!(!meets_threshold(0.6499, RELIABILITY_THRESHOLD));
/// ```
pub fn meets_threshold(score: f64, threshold: f64) -> bool {
    score >= threshold
}

/// Reliability score as a whole percentage for display.
pub fn score_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert!(meets_threshold(0.65, RELIABILITY_THRESHOLD));
        assert!(meets_threshold(0.95, RELIABILITY_THRESHOLD));
        assert!(!meets_threshold(0.64, RELIABILITY_THRESHOLD));
        assert!(!meets_threshold(0.0, RELIABILITY_THRESHOLD));
    }

    #[test]
    fn test_nan_never_meets_threshold() {
        assert!(!meets_threshold(f64::NAN, RELIABILITY_THRESHOLD));
    }

    #[test]
    fn test_score_percent() {
        assert_eq!(score_percent(0.75), 75);
        assert_eq!(score_percent(0.4), 40);
        assert_eq!(score_percent(0.655), 66);
        assert_eq!(score_percent(0.0), 0);
        assert_eq!(score_percent(1.0), 100);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the gate comparison is exactly `score >= 0.65`
        #[test]
        fn test_threshold_matches_comparison(score in 0.0f64..=1.0) {
            prop_assert_eq!(meets_threshold(score, RELIABILITY_THRESHOLD), score >= 0.65);
        }

        /// Property: percentages stay within [0, 100] for valid scores
        #[test]
        fn test_percent_in_range(score in 0.0f64..=1.0) {
            let pct = score_percent(score);
            prop_assert!((0..=100).contains(&pct));
        }
    }
}
