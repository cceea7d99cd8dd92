//! Hour-of-day and day-of-week ranking.

use std::collections::BTreeMap;

use crate::analytics::{
    calendar::day_name,
    config::{BEST_DAYS_LIMIT, BEST_HOURS_LIMIT},
    types::{DayRank, HourRank, Observation, OptimalTimes},
};

/// Rank the cheapest 5 hours and 3 days of a raw (unsmoothed) series.
pub fn aggregate(series: &[Observation]) -> OptimalTimes {
    aggregate_with_limits(series, BEST_HOURS_LIMIT, BEST_DAYS_LIMIT)
}

pub fn aggregate_with_limits(
    series: &[Observation],
    hours_limit: usize,
    days_limit: usize,
) -> OptimalTimes {
    let mut hourly: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    let mut daily: BTreeMap<u32, Vec<f64>> = BTreeMap::new();

    for obs in series {
        // The hour bucket exists once its hour is seen, even without a usable fee.
        let hour_fees = hourly.entry(obs.hour_of_day).or_default();
        if !obs.avg_fee.is_finite() {
            continue;
        }
        hour_fees.push(obs.avg_fee);
        daily.entry(obs.day_of_week).or_default().push(obs.avg_fee);
    }

    let mut best_hours: Vec<HourRank> = hourly
        .into_iter()
        .map(|(hour, mut fees)| HourRank {
            hour,
            avg_fee: mean(&mut fees),
        })
        .collect();
    let mut best_days: Vec<DayRank> = daily
        .into_iter()
        .map(|(day, mut fees)| DayRank {
            day,
            day_name: day_name(day).to_string(),
            avg_fee: mean(&mut fees),
        })
        .collect();

    // Stable sorts over index-ordered buckets: lower index wins ties.
    best_hours.sort_by(|a, b| a.avg_fee.total_cmp(&b.avg_fee));
    best_days.sort_by(|a, b| a.avg_fee.total_cmp(&b.avg_fee));
    best_hours.truncate(hours_limit);
    best_days.truncate(days_limit);

    OptimalTimes {
        best_hours,
        best_days,
    }
}

/// Mean of a bucket, 0 when empty. Values are summed in sorted order so the
/// result does not depend on input order.
fn mean(fees: &mut [f64]) -> f64 {
    if fees.is_empty() {
        return 0.0;
    }
    fees.sort_by(f64::total_cmp);
    fees.iter().sum::<f64>() / fees.len() as f64
}
