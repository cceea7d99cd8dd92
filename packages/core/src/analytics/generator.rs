//! Synthetic fee history.
//!
//! Builds `days × 24` hourly observations from a weekly sine wave, a
//! time-of-day profile and a weekend discount, scaled by the current safe
//! price and jittered by a uniform factor per observation.

use std::f64::consts::PI;

use chrono::{DateTime, Days, TimeZone};
use rand::Rng;

use crate::analytics::{
    calendar::{day_of_week, hour_start},
    config::{
        FeeFloors, ACTIVE_HOURS_PEAK, DEFAULT_BASE_PRICE, FALLBACK_DAY_STEP, FALLBACK_FEE_FLOORS,
        FALLBACK_HIGH_FEE_RATIO, FALLBACK_HOUR_AMPLITUDE, FEE_FLOORS, HIGH_FEE_RATIO,
        HOURS_PER_DAY, HOURS_PER_WEEK, JITTER_MAX, JITTER_MIN, LOW_FEE_RATIO, NIGHT_FACTOR,
        SHOULDER_FACTOR, WEEKEND_FACTOR, WEEKLY_AMPLITUDE,
    },
    error::AnalyticsError,
    types::{Observation, PriceQuote, Series},
};

/// Generator holding the precomputed weekly and daily patterns.
#[derive(Debug, Clone)]
pub struct HistoryGenerator {
    weekly: Vec<f64>,
    daily: [f64; 24],
}

impl Default for HistoryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryGenerator {
    pub fn new() -> Self {
        let weekly = (0..HOURS_PER_WEEK)
            .map(|idx| {
                (2.0 * PI * idx as f64 / HOURS_PER_WEEK as f64).sin() * WEEKLY_AMPLITUDE + 1.0
            })
            .collect();

        let mut daily = [SHOULDER_FACTOR; 24];
        for (hour, factor) in daily.iter_mut().enumerate() {
            *factor = match hour {
                9..=20 => 1.0 + ACTIVE_HOURS_PEAK * ((hour as f64 - 9.0) / 11.0 * PI).sin(),
                1..=5 => NIGHT_FACTOR,
                _ => SHOULDER_FACTOR,
            };
        }

        Self { weekly, daily }
    }

    /// Deterministic multiplier for an observation, before jitter.
    ///
    /// `day_offset` counts back from today; `weekday` uses 0 = Sunday.
    pub fn envelope(&self, day_offset: u32, hour: u32, weekday: u32) -> f64 {
        let idx = (day_offset as usize * HOURS_PER_DAY as usize + hour as usize) % HOURS_PER_WEEK;
        let weekend_factor = if weekday == 0 || weekday == 6 {
            WEEKEND_FACTOR
        } else {
            1.0
        };
        self.weekly[idx] * self.daily[hour as usize % 24] * weekend_factor
    }

    /// Generate `days` days of hourly history ending today, oldest first.
    pub fn generate<Tz: TimeZone, R: Rng + ?Sized>(
        &self,
        days: u32,
        base_price: f64,
        now: &DateTime<Tz>,
        rng: &mut R,
    ) -> Result<Series, AnalyticsError> {
        let base_price = resolve_base_price(base_price);
        let tz = now.timezone();
        let today = now.date_naive();
        let current_weekday = day_of_week(now);
        let mut series = Vec::with_capacity(days as usize * HOURS_PER_DAY as usize);

        for day in 0..days {
            let date = today.checked_sub_days(Days::new(day.into())).ok_or_else(|| {
                AnalyticsError::generation_failure(format!("{} days before {} is out of range", day, today))
            })?;
            let weekday = (current_weekday + 7 - day % 7) % 7;

            for hour in 0..HOURS_PER_DAY {
                let jitter = rng.gen_range(JITTER_MIN..=JITTER_MAX);
                let multiplier = self.envelope(day, hour, weekday) * jitter;
                if !multiplier.is_finite() {
                    return Err(AnalyticsError::generation_failure(format!(
                        "non-finite multiplier at day {} hour {}",
                        day, hour
                    )));
                }

                let at = hour_start(&tz, date, hour);
                series.push(observation(&at, base_price * multiplier, HIGH_FEE_RATIO, FEE_FLOORS));
            }
        }

        series.sort_by_key(|obs| obs.timestamp);
        Ok(series)
    }

    /// Generate history, falling back to [`generate_fallback`] on failure.
    ///
    /// Returns the series and whether the fallback model was used.
    pub fn generate_or_fallback<Tz: TimeZone, R: Rng + ?Sized>(
        &self,
        days: u32,
        base_price: f64,
        now: &DateTime<Tz>,
        rng: &mut R,
    ) -> (Series, bool) {
        match self.generate(days, base_price, now, rng) {
            Ok(series) => (series, false),
            Err(err) => {
                tracing::error!("{}; using fallback history", err);
                (generate_fallback(days, now), true)
            }
        }
    }
}

/// Seed price for generation from a reconciled quote.
pub fn base_price_from_quote(quote: Option<&PriceQuote>) -> f64 {
    resolve_base_price(quote.map(|q| q.safe).unwrap_or(f64::NAN))
}

/// Replace a non-finite or non-positive seed with the default.
pub fn resolve_base_price(candidate: f64) -> f64 {
    if candidate.is_finite() && candidate > 0.0 {
        candidate
    } else {
        tracing::warn!(
            "{}; using {}",
            AnalyticsError::InvalidBasePrice { value: candidate },
            DEFAULT_BASE_PRICE
        );
        DEFAULT_BASE_PRICE
    }
}

/// Simpler deterministic model used when [`HistoryGenerator::generate`] fails.
pub fn generate_fallback<Tz: TimeZone>(days: u32, now: &DateTime<Tz>) -> Series {
    let tz = now.timezone();
    let today = now.date_naive();
    let mut series = Vec::with_capacity(days as usize * HOURS_PER_DAY as usize);

    for day in 0..days {
        let Some(date) = today.checked_sub_days(Days::new(day.into())) else {
            break;
        };

        for hour in 0..HOURS_PER_DAY {
            let at = hour_start(&tz, date, hour);
            let hour_factor = 1.0 + (hour as f64 / 12.0 * PI).sin() * FALLBACK_HOUR_AMPLITUDE;
            let day_factor = 1.0 - (day_of_week(&at) % 7) as f64 * FALLBACK_DAY_STEP;
            series.push(observation(
                &at,
                DEFAULT_BASE_PRICE * hour_factor * day_factor,
                FALLBACK_HIGH_FEE_RATIO,
                FALLBACK_FEE_FLOORS,
            ));
        }
    }

    series.sort_by_key(|obs| obs.timestamp);
    series
}

fn observation<Tz: TimeZone>(
    at: &DateTime<Tz>,
    raw_fee: f64,
    high_ratio: f64,
    floors: FeeFloors,
) -> Observation {
    let avg_fee = raw_fee.round().max(floors.avg);
    let low_fee = (avg_fee * LOW_FEE_RATIO).round().max(floors.low);
    let high_fee = (avg_fee * high_ratio).round().max(floors.high);
    Observation::at(at, avg_fee, low_fee, high_fee)
}
