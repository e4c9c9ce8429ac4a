/// Linear-interpolation quantile of an ascending slice.
///
/// The position is `(n - 1) * q`; a fractional position interpolates between
/// its two neighbours. `q` is clamped to `[0, 1]`. Returns `None` for an empty slice.
///
/// All percentile computations in the crate go through this function.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = if q.is_nan() { 0.0 } else { q.clamp(0.0, 1.0) };
    let position = (sorted.len() - 1) as f64 * q;
    let lo = position.floor() as usize;
    let hi = position.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (position - lo as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolates_between_neighbours() {
        assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0, 4.0], 0.75), Some(3.25));
    }

    #[test]
    fn test_exact_position() {
        assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5), Some(3.0));
    }

    #[test]
    fn test_bounds_are_min_and_max() {
        let seq = [-2.0, 0.5, 7.0];
        assert_eq!(quantile_sorted(&seq, 0.0), Some(-2.0));
        assert_eq!(quantile_sorted(&seq, 1.0), Some(7.0));
    }

    #[test]
    fn test_single_element_and_empty() {
        assert_eq!(quantile_sorted(&[42.0], 0.95), Some(42.0));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_out_of_range_q_is_clamped() {
        let seq = [1.0, 2.0];
        assert_eq!(quantile_sorted(&seq, -1.0), Some(1.0));
        assert_eq!(quantile_sorted(&seq, 3.0), Some(2.0));
    }
}
