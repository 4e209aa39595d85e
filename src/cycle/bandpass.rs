//! Baxter-King band-pass filter for monthly series.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::data::model::{MonthlySeries, Observation};
use crate::error::DataError;

/// Shortest cycle passed by the filter, in months (6 quarters).
pub const LOW_PERIOD: usize = 18;
/// Longest cycle passed by the filter, in months (32 quarters).
pub const HIGH_PERIOD: usize = 96;
/// Symmetric lead/lag window, in months. The filter consumes this many
/// observations at each end of the series.
pub const HALF_WINDOW: usize = 12;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Band-pass filter parameters. Periods are in months; cycles shorter than
/// `low_period` or longer than `high_period` are attenuated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandPassConfig {
    pub low_period: usize,
    pub high_period: usize,
    pub half_window: usize,
}

impl BandPassConfig {
    pub fn new(
        low_period: usize,
        high_period: usize,
        half_window: usize,
    ) -> Result<Self, DataError> {
        if low_period < 2 {
            return Err(DataError::InvalidFilterConfig(format!(
                "low period {low_period} is below the 2-month sampling limit"
            )));
        }
        if low_period >= high_period {
            return Err(DataError::InvalidFilterConfig(format!(
                "low period {low_period} must be shorter than high period {high_period}"
            )));
        }
        if half_window == 0 {
            return Err(DataError::InvalidFilterConfig(
                "half window must be at least 1".to_string(),
            ));
        }
        Ok(BandPassConfig {
            low_period,
            high_period,
            half_window,
        })
    }

    /// Minimum series length for a non-empty filter output.
    pub fn min_series_len(&self) -> usize {
        2 * self.half_window + 1
    }
}

impl Default for BandPassConfig {
    /// The business-cycle band: 1.5 to 8 year cycles, 12-month window.
    fn default() -> Self {
        BandPassConfig {
            low_period: LOW_PERIOD,
            high_period: HIGH_PERIOD,
            half_window: HALF_WINDOW,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter kernel
// ---------------------------------------------------------------------------

/// Compute the symmetric filter taps `b[-K..=K]`, returned as a vector of
/// length `2K + 1` with the center tap at index `K`.
///
/// Construction: the ideal low-pass filter with cutoff frequency `ω` has
/// taps `ω/π` (center) and `sin(jω)/(jπ)` at lag `j`. Differencing the
/// low-pass filters for the two cutoff periods gives the ideal band-pass,
/// truncated to the window; a uniform adjustment then forces the taps to
/// sum to zero so the filter has no gain at frequency zero and removes the
/// trend exactly.
pub fn weights(config: &BandPassConfig) -> Vec<f64> {
    let k = config.half_window;
    let omega_low = 2.0 * PI / config.high_period as f64;
    let omega_high = 2.0 * PI / config.low_period as f64;

    // One-sided taps, j = 0..=K.
    let mut one_sided = Vec::with_capacity(k + 1);
    one_sided.push((omega_high - omega_low) / PI);
    for j in 1..=k {
        let j = j as f64;
        one_sided.push(((omega_high * j).sin() - (omega_low * j).sin()) / (PI * j));
    }

    // Force the taps to sum to zero.
    let tap_sum = one_sided[0] + 2.0 * one_sided[1..].iter().sum::<f64>();
    let adjustment = -tap_sum / (2 * k + 1) as f64;
    for tap in &mut one_sided {
        *tap += adjustment;
    }

    // Mirror into the full symmetric window.
    let mut taps = vec![0.0; 2 * k + 1];
    for (j, &tap) in one_sided.iter().enumerate() {
        taps[k + j] = tap;
        taps[k - j] = tap;
    }
    taps
}

/// Apply the band-pass filter: `y[t] = Σ_{j=-K..K} b[j]·x[t+j]` wherever
/// the full window fits. The output keeps the input dates with
/// `half_window` months trimmed from each end, so its length is `n − 2K`.
pub fn apply(config: &BandPassConfig, series: &MonthlySeries) -> Result<MonthlySeries, DataError> {
    let k = config.half_window;
    let n = series.len();
    if n < config.min_series_len() {
        return Err(DataError::SeriesTooShort {
            len: n,
            needed: config.min_series_len(),
        });
    }

    let taps = weights(config);
    let input = series.observations();

    let mut filtered = Vec::with_capacity(n - 2 * k);
    for t in k..n - k {
        let mut acc = 0.0;
        for (tap_idx, tap) in taps.iter().enumerate() {
            acc += tap * input[t + tap_idx - k].value;
        }
        filtered.push(Observation {
            date: input[t].date,
            value: acc,
        });
    }

    log::info!(
        "Band-pass filter ({}-{} months, K={}): {} -> {} observations",
        config.low_period,
        config.high_period,
        k,
        n,
        filtered.len()
    );
    Ok(MonthlySeries::from_sorted_unchecked(filtered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, NaiveDate};

    /// Monthly series starting January 2000 with the given values.
    fn series_from(values: &[f64]) -> MonthlySeries {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, &value)| Observation {
                date: start + Months::new(i as u32),
                value,
            })
            .collect();
        MonthlySeries::from_observations(observations).unwrap()
    }

    #[test]
    fn weights_are_symmetric_and_sum_to_zero() {
        let config = BandPassConfig::default();
        let taps = weights(&config);

        assert_eq!(taps.len(), 2 * HALF_WINDOW + 1);
        for j in 0..=HALF_WINDOW {
            assert_eq!(taps[HALF_WINDOW + j], taps[HALF_WINDOW - j]);
        }
        let sum: f64 = taps.iter().sum();
        assert!(sum.abs() < 1e-12, "tap sum {sum}");
    }

    #[test]
    fn output_length_is_input_minus_window() {
        let config = BandPassConfig::default();
        let series = series_from(&vec![100.0; 60]);
        let filtered = apply(&config, &series).unwrap();

        assert_eq!(filtered.len(), 60 - 2 * HALF_WINDOW);
        // Output dates are the input dates with K trimmed at each end.
        assert_eq!(
            filtered.first().unwrap().date,
            NaiveDate::from_ymd_opt(2001, 1, 1).unwrap()
        );
        assert_eq!(
            filtered.last().unwrap().date,
            NaiveDate::from_ymd_opt(2003, 12, 1).unwrap()
        );
    }

    #[test]
    fn too_short_series_is_rejected() {
        let config = BandPassConfig::default();
        let series = series_from(&vec![1.0; 2 * HALF_WINDOW]);
        assert!(matches!(
            apply(&config, &series),
            Err(DataError::SeriesTooShort { len: 24, needed: 25 })
        ));
    }

    #[test]
    fn constant_series_filters_to_zero() {
        let config = BandPassConfig::default();
        let series = series_from(&vec![42.5; 100]);
        let filtered = apply(&config, &series).unwrap();

        for value in filtered.values() {
            assert!(value.abs() < 1e-9, "constant response {value}");
        }
    }

    #[test]
    fn linear_trend_filters_to_zero() {
        // The taps sum to zero (kills the level) and are symmetric (kills
        // the slope), so a straight line vanishes exactly.
        let config = BandPassConfig::default();
        let values: Vec<f64> = (0..120).map(|t| 4.6 + 0.002 * t as f64).collect();
        let filtered = apply(&config, &series_from(&values)).unwrap();

        for value in filtered.values() {
            assert!(value.abs() < 1e-9, "trend response {value}");
        }
    }

    #[test]
    fn filter_is_linear() {
        let config = BandPassConfig::default();
        let x: Vec<f64> = (0..80).map(|t| (t as f64 * 0.3).sin()).collect();
        let y: Vec<f64> = (0..80).map(|t| (t as f64 * 0.07).cos() + 0.01 * t as f64).collect();
        let (a, b) = (2.5, -1.25);

        let combined: Vec<f64> = x.iter().zip(&y).map(|(&xv, &yv)| a * xv + b * yv).collect();

        let fx = apply(&config, &series_from(&x)).unwrap();
        let fy = apply(&config, &series_from(&y)).unwrap();
        let fc = apply(&config, &series_from(&combined)).unwrap();

        for ((cx, cy), cc) in fx.values().zip(fy.values()).zip(fc.values()) {
            assert!((a * cx + b * cy - cc).abs() < 1e-10);
        }
    }

    #[test]
    fn passband_sinusoid_survives_and_trend_is_suppressed() {
        // 24-month cycle sits inside the 18-96 month pass band; the gain
        // of the truncated filter there is ~0.84.
        let config = BandPassConfig::default();
        let amplitude = 0.05;
        let values: Vec<f64> = (0..300)
            .map(|t| {
                let t = t as f64;
                amplitude * (2.0 * PI * t / 24.0).sin() + 4.6 + 0.001 * t
            })
            .collect();

        let filtered = apply(&config, &series_from(&values)).unwrap();
        let peak = filtered.values().fold(0.0f64, |acc, v| acc.max(v.abs()));

        let ratio = peak / amplitude;
        assert!(
            (0.7..=1.0).contains(&ratio),
            "pass-band amplitude ratio {ratio}"
        );

        // With the sinusoid removed, only the (annihilated) trend remains.
        let trend_only: Vec<f64> = (0..300).map(|t| 4.6 + 0.001 * t as f64).collect();
        let trend_filtered = apply(&config, &series_from(&trend_only)).unwrap();
        let trend_peak = trend_filtered.values().fold(0.0f64, |acc, v| acc.max(v.abs()));
        assert!(trend_peak < 1e-9, "trend leak {trend_peak}");
    }

    #[test]
    fn config_validation() {
        assert!(BandPassConfig::new(18, 96, 12).is_ok());
        assert!(matches!(
            BandPassConfig::new(1, 96, 12),
            Err(DataError::InvalidFilterConfig(_))
        ));
        assert!(matches!(
            BandPassConfig::new(96, 18, 12),
            Err(DataError::InvalidFilterConfig(_))
        ));
        assert!(matches!(
            BandPassConfig::new(18, 96, 0),
            Err(DataError::InvalidFilterConfig(_))
        ));
    }
}
