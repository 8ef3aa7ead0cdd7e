//! Window sizing guidance.

/// Suggest a sliding-window length for an expected changepoint rate.
///
/// With a change occurring each round independently with probability
/// `change_rate`, segments last `1 / change_rate` rounds on average, and a
/// window of about that length is the natural operating point for SW-UCB
/// (Garivier & Moulines 2008, arXiv:0805.3415).
///
/// Returns `None` when `change_rate` is non-positive or not finite: a
/// stationary stream has no finite natural window.
///
/// # Example
///
/// ```rust
/// use regime::suggested_window_len;
///
/// assert_eq!(suggested_window_len(0.002), Some(500));
/// assert_eq!(suggested_window_len(0.0), None);
/// ```
pub fn suggested_window_len(change_rate: f64) -> Option<u64> {
    if change_rate.is_finite() && change_rate > 0.0 {
        Some(((1.0 / change_rate + 0.5) as u64).max(1))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_the_mean_segment_length() {
        assert_eq!(suggested_window_len(0.01), Some(100));
        assert_eq!(suggested_window_len(0.002), Some(500));
        // Rounds, not truncates.
        assert_eq!(suggested_window_len(0.003), Some(333));
    }

    #[test]
    fn degenerate_rates_have_no_window() {
        assert_eq!(suggested_window_len(0.0), None);
        assert_eq!(suggested_window_len(-0.5), None);
        assert_eq!(suggested_window_len(f64::NAN), None);
    }

    #[test]
    fn near_one_rate_still_yields_a_usable_window() {
        assert_eq!(suggested_window_len(0.9), Some(1));
    }
}
