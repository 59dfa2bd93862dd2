// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// Unweighted mean of the trailing `period` closes. The dashboard plots four
// windows (5, 10, 50, 100) on one panel.

/// Compute the SMA series for `closes`, aligned with the input.
///
/// The output has one element per close: `None` while the trailing window is
/// still filling (indices `< period - 1`), `Some(mean)` afterwards.
///
/// # Edge cases
/// - `period == 0` => all `None` (a zero-length window has no mean)
/// - `closes.len() < period` => all `None`
pub fn calculate_sma(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < period {
        return result;
    }

    for (i, window) in closes.windows(period).enumerate() {
        result[i + period - 1] = Some(window.iter().sum::<f64>() / period as f64);
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_empty_input() {
        assert!(calculate_sma(&[], 5).is_empty());
    }

    #[test]
    fn sma_period_zero() {
        assert_eq!(calculate_sma(&[1.0, 2.0, 3.0], 0), vec![None, None, None]);
    }

    #[test]
    fn sma_insufficient_data() {
        assert_eq!(calculate_sma(&[1.0, 2.0], 5), vec![None, None]);
    }

    #[test]
    fn sma_warmup_gap_then_values() {
        let closes: Vec<f64> = (1..=6).map(|x| x as f64).collect();
        let sma = calculate_sma(&closes, 3);

        assert_eq!(sma.len(), 6);
        assert_eq!(sma[0], None);
        assert_eq!(sma[1], None);
        // Means of [1,2,3], [2,3,4], [3,4,5], [4,5,6].
        for (i, expected) in [2.0, 3.0, 4.0, 5.0].iter().enumerate() {
            let got = sma[i + 2].expect("window is full from index 2");
            assert!((got - expected).abs() < 1e-12, "index {}: got {got}", i + 2);
        }
    }

    #[test]
    fn sma_period_equals_length() {
        let sma = calculate_sma(&[2.0, 4.0, 6.0], 3);
        assert_eq!(sma[0], None);
        assert_eq!(sma[1], None);
        assert!((sma[2].unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn sma_is_exact_mean_of_trailing_window() {
        let closes = vec![44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10];
        let period = 5;
        let sma = calculate_sma(&closes, period);

        for i in (period - 1)..closes.len() {
            let mean: f64 =
                closes[i + 1 - period..=i].iter().sum::<f64>() / period as f64;
            assert!((sma[i].unwrap() - mean).abs() < 1e-12);
        }
    }
}
