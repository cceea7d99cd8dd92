//! Analytics refresh scheduler.
//!
//! Re-runs the analytics engine on a fixed interval and publishes each
//! snapshot to the shared slot read by the API layer.

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time;

use crate::analytics::{GasAnalyticsEngine, SnapshotSlot};
use crate::metrics::AppMetrics;

/// Run the refresh loop until `Ctrl+C` (SIGINT) is received.
///
/// A refresh still in flight at shutdown is dropped without being
/// published.
pub async fn run_refresh_loop(
    engine: Arc<GasAnalyticsEngine>,
    snapshot: SnapshotSlot,
    metrics: Arc<AppMetrics>,
    refresh_interval_seconds: u64,
) {
    let mut interval = time::interval(Duration::from_secs(refresh_interval_seconds.max(1)));

    tracing::info!(
        "Gas analytics refresh started (interval: {}s)",
        refresh_interval_seconds
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                tokio::select! {
                    _ = refresh_once(&engine, &snapshot, &metrics) => {}
                    _ = signal::ctrl_c() => {
                        tracing::info!("Shutdown signal received during refresh. Discarding it.");
                        break;
                    }
                }
            }

            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown signal received. Stopping refresh.");
                break;
            }
        }
    }

    tracing::info!("Gas analytics refresh stopped cleanly");
}

/// Execute a single refresh cycle. Extracted for testability.
pub async fn refresh_once(
    engine: &Arc<GasAnalyticsEngine>,
    snapshot: &SnapshotSlot,
    metrics: &Arc<AppMetrics>,
) {
    let fresh = engine.refresh().await;
    metrics.record_snapshot(&fresh);

    tracing::info!(
        "Gas analytics refreshed ({} quote, safe {} Gwei, {} observations{})",
        fresh.quote_origin.as_str(),
        fresh.quote.safe,
        fresh.series.len(),
        if fresh.used_fallback_generator { ", fallback history" } else { "" },
    );
    if let Some(next) = &fresh.next_optimal {
        tracing::debug!("Next optimal moment: {} at {}:00 ({:.1} Gwei)", next.day_label, next.hour, next.fee);
    }

    *snapshot.write().await = Some(fresh);
}
