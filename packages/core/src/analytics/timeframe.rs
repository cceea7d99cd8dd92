//! Chart timeframe selection.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::analytics::types::{Observation, Series};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFrame {
    #[default]
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "14d")]
    Last14Days,
}

impl TimeFrame {
    /// Parse a query value; anything unrecognised selects the last 24 hours.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("7d") => TimeFrame::Last7Days,
            Some("14d") => TimeFrame::Last14Days,
            _ => TimeFrame::Last24Hours,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::Last24Hours => "24h",
            TimeFrame::Last7Days => "7d",
            TimeFrame::Last14Days => "14d",
        }
    }

    pub fn duration(&self) -> Duration {
        match self {
            TimeFrame::Last24Hours => Duration::hours(24),
            TimeFrame::Last7Days => Duration::days(7),
            TimeFrame::Last14Days => Duration::days(14),
        }
    }

    /// Observations at or after `now_ms` minus the timeframe.
    pub fn filter(&self, series: &[Observation], now_ms: i64) -> Series {
        let cutoff = now_ms - self.duration().num_milliseconds();
        series
            .iter()
            .filter(|obs| obs.timestamp >= cutoff)
            .copied()
            .collect()
    }
}
