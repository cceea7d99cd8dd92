//! Core data types for gas price analytics

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Current gas price per fee tier, in Gwei.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub safe: f64,
    pub standard: f64,
    pub fast: f64,
}

impl PriceQuote {
    pub const fn new(safe: f64, standard: f64, fast: f64) -> Self {
        Self { safe, standard, fast }
    }

    /// Round every tier to the nearest whole Gwei.
    pub fn rounded(self) -> Self {
        Self {
            safe: self.safe.round(),
            standard: self.standard.round(),
            fast: self.fast.round(),
        }
    }
}

/// Gas station reading. Tiers are reported in tenths of a Gwei.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationQuote {
    #[serde(rename = "safeLow")]
    pub safe_low: f64,
    pub average: f64,
    pub fast: f64,
}

impl StationQuote {
    /// Convert tenths of a Gwei into a whole-Gwei quote (unrounded).
    pub fn to_gwei(&self) -> PriceQuote {
        PriceQuote {
            safe: self.safe_low / 10.0,
            standard: self.average / 10.0,
            fast: self.fast / 10.0,
        }
    }
}

/// Where a reconciled quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteOrigin {
    /// Mean of both upstream feeds
    Blended,
    PrimaryOnly,
    SecondaryOnly,
    /// Both feeds failed; fixed default quote
    Fallback,
}

impl QuoteOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteOrigin::Blended => "blended",
            QuoteOrigin::PrimaryOnly => "primary_only",
            QuoteOrigin::SecondaryOnly => "secondary_only",
            QuoteOrigin::Fallback => "fallback",
        }
    }
}

/// Result of merging the two upstream feeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub quote: PriceQuote,
    pub origin: QuoteOrigin,
}

/// One hourly fee sample with its calendar fields.
///
/// `hour_of_day` and `day_of_week` (0 = Sunday) are taken from the local
/// timestamp when the observation is created and are never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Epoch milliseconds
    pub timestamp: i64,
    pub avg_fee: f64,
    pub low_fee: f64,
    pub high_fee: f64,
    pub hour_of_day: u32,
    pub day_of_week: u32,
}

impl Observation {
    pub fn at<Tz: TimeZone>(at: &DateTime<Tz>, avg_fee: f64, low_fee: f64, high_fee: f64) -> Self {
        Self {
            timestamp: at.timestamp_millis(),
            avg_fee,
            low_fee,
            high_fee,
            hour_of_day: at.hour(),
            day_of_week: at.weekday().num_days_from_sunday(),
        }
    }
}

/// Hourly fee observations ordered by timestamp.
pub type Series = Vec<Observation>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourRank {
    pub hour: u32,
    pub avg_fee: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRank {
    pub day: u32,
    pub day_name: String,
    pub avg_fee: f64,
}

/// Cheapest hours of the day and days of the week, cheapest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimalTimes {
    pub best_hours: Vec<HourRank>,
    pub best_days: Vec<DayRank>,
}

/// The next calendar moment predicted to be cheapest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalMoment {
    pub hour: u32,
    /// "Today", or the weekday name of the projected date
    pub day_label: String,
    pub fee: f64,
    pub full_date: DateTime<FixedOffset>,
    pub days_from_now: u32,
}

impl OptimalMoment {
    /// Relative label for moments on a later day.
    pub fn eta_label(&self) -> Option<String> {
        match self.days_from_now {
            0 => None,
            1 => Some("Tomorrow".to_string()),
            n => Some(format!("In {} days", n)),
        }
    }
}

/// Everything one refresh cycle produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub quote: PriceQuote,
    pub quote_origin: QuoteOrigin,
    /// Raw, unsmoothed history
    pub series: Series,
    pub optimal_times: OptimalTimes,
    pub next_optimal: Option<OptimalMoment>,
    pub used_fallback_generator: bool,
    pub generated_at: DateTime<Utc>,
}
