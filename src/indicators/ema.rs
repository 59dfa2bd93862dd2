// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// Recursively weighted average favouring recent values:
//
//   alpha  = 2 / (span + 1)
//   ema[0] = value[0]
//   ema[i] = value[i] * alpha + ema[i-1] * (1 - alpha)
//
// Seeding with the first value makes the series total — no warm-up gap,
// unlike the SMA. The MACD triple is built from three of these.

/// Compute the EMA series for `values` with smoothing span `span`.
///
/// The output is aligned with the input (same length). Returns an empty vec
/// when `span == 0` or the input is empty.
pub fn calculate_ema(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 || values.is_empty() {
        return Vec::new();
    }

    let alpha = 2.0 / (span + 1) as f64;

    let mut result = Vec::with_capacity(values.len());
    let mut prev = values[0];
    result.push(prev);

    for &value in &values[1..] {
        prev = value * alpha + prev * (1.0 - alpha);
        result.push(prev);
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
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 5).is_empty());
    }

    #[test]
    fn ema_span_zero() {
        assert!(calculate_ema(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn ema_seeds_with_first_value() {
        let ema = calculate_ema(&[7.5, 8.0, 9.0], 12);
        assert!((ema[0] - 7.5).abs() < 1e-12);
    }

    #[test]
    fn ema_same_length_as_input() {
        let values: Vec<f64> = (1..=40).map(|x| x as f64).collect();
        assert_eq!(calculate_ema(&values, 12).len(), 40);
    }

    #[test]
    fn ema_constant_series_stays_constant() {
        let ema = calculate_ema(&[100.0; 30], 9);
        for &v in &ema {
            assert!((v - 100.0).abs() < 1e-10, "expected 100.0, got {v}");
        }
    }

    #[test]
    fn ema_known_values() {
        // span 3 => alpha = 0.5
        let ema = calculate_ema(&[2.0, 4.0, 8.0], 3);
        assert!((ema[0] - 2.0).abs() < 1e-12);
        assert!((ema[1] - 3.0).abs() < 1e-12); // 4*0.5 + 2*0.5
        assert!((ema[2] - 5.5).abs() < 1e-12); // 8*0.5 + 3*0.5
    }
}
