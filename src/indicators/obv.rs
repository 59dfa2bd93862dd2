// =============================================================================
// On-Balance Volume (OBV)
// =============================================================================
//
// Cumulative volume flow keyed on close-to-close direction:
//
//   obv[0] = 0
//   close[i] >  close[i-1]  =>  obv[i] = obv[i-1] + volume[i]
//   close[i] <  close[i-1]  =>  obv[i] = obv[i-1] - volume[i]
//   close[i] == close[i-1]  =>  obv[i] = obv[i-1]
//
// Single O(N) pass with one running accumulator; each value depends on the
// previous one, so no other evaluation order is valid.

use crate::types::RawBar;

/// Compute the OBV series for `bars`, aligned with the input.
pub fn calculate_obv(bars: &[RawBar]) -> Vec<i64> {
    let mut result = Vec::with_capacity(bars.len());
    let mut obv: i64 = 0;

    for (i, bar) in bars.iter().enumerate() {
        if i > 0 {
            let prev_close = bars[i - 1].close;
            if bar.close > prev_close {
                obv += bar.volume as i64;
            } else if bar.close < prev_close {
                obv -= bar.volume as i64;
            }
        }
        result.push(obv);
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bar(day: u32, close: f64, volume: u64) -> RawBar {
        RawBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date"),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
        }
    }

    #[test]
    fn obv_empty_input() {
        assert!(calculate_obv(&[]).is_empty());
    }

    #[test]
    fn obv_single_bar_is_zero() {
        assert_eq!(calculate_obv(&[bar(1, 100.0, 5000)]), vec![0]);
    }

    #[test]
    fn obv_up_down_scenario() {
        // Closes [10, 12, 11], volumes [100, 200, 150] => obv [0, 200, 50].
        let bars = vec![bar(1, 10.0, 100), bar(2, 12.0, 200), bar(3, 11.0, 150)];
        assert_eq!(calculate_obv(&bars), vec![0, 200, 50]);
    }

    #[test]
    fn obv_strictly_increasing_closes_sum_volume() {
        let bars: Vec<RawBar> = (1..=10)
            .map(|i| bar(i, 100.0 + i as f64, 100 * i as u64))
            .collect();
        let obv = calculate_obv(&bars);

        let mut cumulative: i64 = 0;
        for (i, b) in bars.iter().enumerate() {
            if i > 0 {
                cumulative += b.volume as i64;
            }
            assert_eq!(obv[i], cumulative);
        }
    }

    #[test]
    fn obv_constant_closes_stay_zero() {
        let bars: Vec<RawBar> = (1..=8).map(|i| bar(i, 55.0, 900)).collect();
        assert!(calculate_obv(&bars).iter().all(|&v| v == 0));
    }
}
