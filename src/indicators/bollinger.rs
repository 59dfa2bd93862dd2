// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Middle band = trailing SMA; upper/lower = middle ± num_std * σ where σ is
// the *sample* standard deviation (n-1 divisor) of the same window. The
// dashboard shades the 20-period ± 2σ band behind the candles.

/// Upper and lower band series, aligned with the input closes.
///
/// Both are `None` until the trailing window is full.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerSeries {
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Calculate Bollinger Bands over `closes`.
///
/// # Edge cases
/// - `period < 2` => all `None` (sample deviation needs two points)
/// - `closes.len() < period` => all `None`
pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerSeries {
    let mut upper = vec![None; closes.len()];
    let mut lower = vec![None; closes.len()];

    if period >= 2 && closes.len() >= period {
        for (i, window) in closes.windows(period).enumerate() {
            let mean = window.iter().sum::<f64>() / period as f64;
            let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
                / (period - 1) as f64;
            let std_dev = variance.sqrt();

            upper[i + period - 1] = Some(mean + num_std * std_dev);
            lower[i + period - 1] = Some(mean - num_std * std_dev);
        }
    }

    BollingerSeries { upper, lower }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_insufficient_data() {
        let bands = calculate_bollinger(&[1.0, 2.0, 3.0], 20, 2.0);
        assert!(bands.upper.iter().all(Option::is_none));
        assert!(bands.lower.iter().all(Option::is_none));
    }

    #[test]
    fn bollinger_degenerate_period() {
        let bands = calculate_bollinger(&[1.0, 2.0, 3.0], 1, 2.0);
        assert!(bands.upper.iter().all(Option::is_none));
    }

    #[test]
    fn bollinger_warmup_gap() {
        let closes: Vec<f64> = (1..=25).map(|x| x as f64).collect();
        let bands = calculate_bollinger(&closes, 20, 2.0);

        assert_eq!(bands.upper.iter().filter(|v| v.is_none()).count(), 19);
        assert!(bands.upper[18].is_none());
        assert!(bands.upper[19].is_some());
    }

    #[test]
    fn bollinger_bands_bracket_the_mean() {
        let closes: Vec<f64> = (1..=30).map(|x| (x as f64) * 1.5 + 10.0).collect();
        let bands = calculate_bollinger(&closes, 20, 2.0);

        for i in 19..closes.len() {
            let mean: f64 = closes[i - 19..=i].iter().sum::<f64>() / 20.0;
            let upper = bands.upper[i].unwrap();
            let lower = bands.lower[i].unwrap();
            assert!(upper > mean);
            assert!(lower < mean);
            // Symmetric around the mean.
            assert!(((upper - mean) - (mean - lower)).abs() < 1e-9);
        }
    }

    #[test]
    fn bollinger_flat_series_collapses_to_mean() {
        let bands = calculate_bollinger(&[100.0; 25], 20, 2.0);
        for i in 19..25 {
            assert!((bands.upper[i].unwrap() - 100.0).abs() < 1e-10);
            assert!((bands.lower[i].unwrap() - 100.0).abs() < 1e-10);
        }
    }

    #[test]
    fn bollinger_uses_sample_deviation() {
        // Window [1, 2, 3]: mean 2, sample variance ((1)^2 + 0 + 1^2)/2 = 1.
        let bands = calculate_bollinger(&[1.0, 2.0, 3.0], 3, 2.0);
        assert!((bands.upper[2].unwrap() - 4.0).abs() < 1e-12);
        assert!((bands.lower[2].unwrap() - 0.0).abs() < 1e-12);
    }
}
