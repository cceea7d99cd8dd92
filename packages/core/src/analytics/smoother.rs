//! Centered moving average for chart display.
//!
//! Only interior points are smoothed; the first and last `window` entries
//! pass through untouched.

use crate::analytics::types::{Observation, Series};

/// Series shorter than this are returned as-is.
pub const MIN_SMOOTHING_LEN: usize = 5;
pub const MAX_WINDOW: usize = 5;

/// Half-width of the averaging window for a series of `len` points.
pub fn window_size(len: usize) -> usize {
    MAX_WINDOW.min(len / 4)
}

pub fn smooth(series: &[Observation]) -> Series {
    if series.len() < MIN_SMOOTHING_LEN {
        return series.to_vec();
    }

    let window = window_size(series.len());
    let span = (2 * window + 1) as f64;
    let interior = window..series.len() - window;

    series
        .iter()
        .enumerate()
        .map(|(idx, obs)| {
            if !interior.contains(&idx) {
                return *obs;
            }
            let neighbours = &series[idx - window..=idx + window];
            let mean = |fee: fn(&Observation) -> f64| {
                round_to_tenth(neighbours.iter().map(fee).sum::<f64>() / span)
            };
            Observation {
                avg_fee: mean(|o| o.avg_fee),
                low_fee: mean(|o| o.low_fee),
                high_fee: mean(|o| o.high_fee),
                ..*obs
            }
        })
        .collect()
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
