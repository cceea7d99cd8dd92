//! Gas Analytics Engine - orchestrates one refresh cycle

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use rand::Rng;
use tokio::sync::RwLock;

use crate::analytics::{
    aggregator::aggregate_with_limits,
    config::AnalyticsConfig,
    generator::{base_price_from_quote, HistoryGenerator},
    optimizer::project_next,
    reconciler::PriceReconciler,
    types::{AnalyticsSnapshot, PriceQuote, Reconciliation, Series},
};

/// Latest snapshot shared between the scheduler and the API handlers.
pub type SnapshotSlot = Arc<RwLock<Option<AnalyticsSnapshot>>>;

/// Ties the reconciler, the history generator and the ranking together.
pub struct GasAnalyticsEngine {
    config: AnalyticsConfig,
    reconciler: PriceReconciler,
    generator: HistoryGenerator,
}

impl GasAnalyticsEngine {
    pub fn new(config: AnalyticsConfig, reconciler: PriceReconciler) -> Self {
        Self {
            config,
            reconciler,
            generator: HistoryGenerator::new(),
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Current price from both upstream feeds. Never fails.
    pub async fn reconcile_current_price(&self) -> PriceQuote {
        self.reconciler.current_price().await.quote
    }

    /// Synthetic history seeded by the current safe price.
    pub async fn generate_history(&self, days: u32) -> Series {
        let quote = self.reconcile_current_price().await;
        let base_price = base_price_from_quote(Some(&quote));
        let (series, _) = self.generator.generate_or_fallback(
            days,
            base_price,
            &Local::now(),
            &mut rand::thread_rng(),
        );
        series
    }

    /// Run a full refresh cycle against the wall clock.
    pub async fn refresh(&self) -> AnalyticsSnapshot {
        let reconciliation = self.reconciler.current_price().await;
        self.build_snapshot(reconciliation, &Local::now(), &mut rand::thread_rng())
    }

    /// Build a snapshot from an already reconciled quote.
    ///
    /// Ranking runs on the raw series; smoothing is left to the display path.
    pub fn build_snapshot<Tz: TimeZone, R: Rng + ?Sized>(
        &self,
        reconciliation: Reconciliation,
        now: &DateTime<Tz>,
        rng: &mut R,
    ) -> AnalyticsSnapshot {
        let base_price = base_price_from_quote(Some(&reconciliation.quote));
        let (series, used_fallback_generator) =
            self.generator
                .generate_or_fallback(self.config.history_days, base_price, now, rng);

        let optimal_times = aggregate_with_limits(
            &series,
            self.config.best_hours_limit,
            self.config.best_days_limit,
        );
        let next_optimal = project_next(&optimal_times.best_hours, &optimal_times.best_days, now);

        AnalyticsSnapshot {
            quote: reconciliation.quote,
            quote_origin: reconciliation.origin,
            series,
            optimal_times,
            next_optimal,
            used_fallback_generator,
            generated_at: now.with_timezone(&Utc),
        }
    }
}
