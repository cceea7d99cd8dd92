//! Gas price endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{
    calendar::{format_fee, format_hour},
    smooth, DayRank, HourRank, OptimalMoment, QuoteOrigin, Series, TimeFrame,
};
use super::ApiState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentGasResponse {
    pub safe: f64,
    pub standard: f64,
    pub fast: f64,
    pub origin: QuoteOrigin,
    pub updated_at: DateTime<Utc>,
}

pub async fn current_gas(State(state): State<ApiState>) -> Json<CurrentGasResponse> {
    let snapshot = state.latest_snapshot().await;
    Json(CurrentGasResponse {
        safe: snapshot.quote.safe,
        standard: snapshot.quote.standard,
        fast: snapshot.quote.fast,
        origin: snapshot.quote_origin,
        updated_at: snapshot.generated_at,
    })
}

#[derive(Debug, Deserialize)]
pub struct GasHistoryQuery {
    pub timeframe: Option<String>,
    pub smoothed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GasHistoryResponse {
    pub timeframe: TimeFrame,
    pub smoothed: bool,
    pub data_points: usize,
    pub series: Series,
}

/// History for the chart: filtered to the timeframe, then smoothed unless
/// `smoothed=false`.
pub async fn gas_history(
    State(state): State<ApiState>,
    Query(params): Query<GasHistoryQuery>,
) -> Json<GasHistoryResponse> {
    let timeframe = TimeFrame::parse(params.timeframe.as_deref());
    let smoothed = params.smoothed.unwrap_or(true);

    let snapshot = state.latest_snapshot().await;
    let filtered = timeframe.filter(&snapshot.series, Utc::now().timestamp_millis());
    let series = if smoothed { smooth(&filtered) } else { filtered };

    Json(GasHistoryResponse {
        timeframe,
        smoothed,
        data_points: series.len(),
        series,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HourRankView {
    pub hour: u32,
    pub label: String,
    pub avg_fee: f64,
    pub fee_label: String,
}

impl From<&HourRank> for HourRankView {
    fn from(rank: &HourRank) -> Self {
        Self {
            hour: rank.hour,
            label: format_hour(rank.hour),
            avg_fee: rank.avg_fee,
            fee_label: format_fee(rank.avg_fee),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayRankView {
    pub day: u32,
    pub day_name: String,
    pub avg_fee: f64,
    pub fee_label: String,
}

impl From<&DayRank> for DayRankView {
    fn from(rank: &DayRank) -> Self {
        Self {
            day: rank.day,
            day_name: rank.day_name.clone(),
            avg_fee: rank.avg_fee,
            fee_label: format_fee(rank.avg_fee),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NextOptimalView {
    pub hour: u32,
    pub hour_label: String,
    pub day_label: String,
    pub fee: f64,
    pub fee_label: String,
    pub full_date: DateTime<FixedOffset>,
    pub days_from_now: u32,
    pub eta: Option<String>,
}

impl From<&OptimalMoment> for NextOptimalView {
    fn from(moment: &OptimalMoment) -> Self {
        Self {
            hour: moment.hour,
            hour_label: format_hour(moment.hour),
            day_label: moment.day_label.clone(),
            fee: moment.fee,
            fee_label: format_fee(moment.fee),
            full_date: moment.full_date,
            days_from_now: moment.days_from_now,
            eta: moment.eta_label(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OptimalTimesResponse {
    pub best_hours: Vec<HourRankView>,
    pub best_days: Vec<DayRankView>,
    pub next_optimal: Option<NextOptimalView>,
    pub generated_at: DateTime<Utc>,
}

pub async fn optimal_times(State(state): State<ApiState>) -> Json<OptimalTimesResponse> {
    let snapshot = state.latest_snapshot().await;
    Json(OptimalTimesResponse {
        best_hours: snapshot.optimal_times.best_hours.iter().map(Into::into).collect(),
        best_days: snapshot.optimal_times.best_days.iter().map(Into::into).collect(),
        next_optimal: snapshot.next_optimal.as_ref().map(Into::into),
        generated_at: snapshot.generated_at,
    })
}
