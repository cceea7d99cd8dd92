//! Constants and configuration for the analytics engine

use serde::{Deserialize, Serialize};

use crate::analytics::types::PriceQuote;

/// Quote returned when both upstream feeds fail.
pub const FALLBACK_QUOTE: PriceQuote = PriceQuote::new(30.0, 45.0, 60.0);

/// Seed price used when the reconciled safe tier is unusable.
pub const DEFAULT_BASE_PRICE: f64 = 30.0;

pub const DEFAULT_HISTORY_DAYS: u32 = 14;

pub const HOURS_PER_DAY: u32 = 24;
pub const HOURS_PER_WEEK: usize = 7 * 24;

/// Weekly oscillation amplitude around 1.0
pub const WEEKLY_AMPLITUDE: f64 = 0.3;
/// Midday peak added on top of 1.0 during active hours
pub const ACTIVE_HOURS_PEAK: f64 = 0.2;
pub const NIGHT_FACTOR: f64 = 0.7;
pub const SHOULDER_FACTOR: f64 = 0.85;
pub const WEEKEND_FACTOR: f64 = 0.8;

/// Per-observation jitter band
pub const JITTER_MIN: f64 = 0.95;
pub const JITTER_MAX: f64 = 1.05;

/// Low and high fee as a share of the average fee.
pub const LOW_FEE_RATIO: f64 = 0.7;
pub const HIGH_FEE_RATIO: f64 = 1.5;

/// Floors for the primary generator (avg / low / high).
pub const FEE_FLOORS: FeeFloors = FeeFloors { avg: 5.0, low: 3.0, high: 8.0 };

/// Fallback generator model.
pub const FALLBACK_FEE_FLOORS: FeeFloors = FeeFloors { avg: 10.0, low: 5.0, high: 15.0 };
pub const FALLBACK_HIGH_FEE_RATIO: f64 = 1.3;
pub const FALLBACK_HOUR_AMPLITUDE: f64 = 0.3;
pub const FALLBACK_DAY_STEP: f64 = 0.05;

pub const BEST_HOURS_LIMIT: usize = 5;
pub const BEST_DAYS_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeFloors {
    pub avg: f64,
    pub low: f64,
    pub high: f64,
}

/// Configuration for the gas analytics engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Days of hourly history generated per refresh
    pub history_days: u32,
    pub best_hours_limit: usize,
    pub best_days_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            history_days: DEFAULT_HISTORY_DAYS,
            best_hours_limit: BEST_HOURS_LIMIT,
            best_days_limit: BEST_DAYS_LIMIT,
        }
    }
}

impl AnalyticsConfig {
    pub fn with_history_days(mut self, days: u32) -> Self {
        self.history_days = days.max(1);
        self
    }
}
