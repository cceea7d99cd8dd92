//! Prometheus metrics registry for the gas optimizer.
//!
//! [`AppMetrics`] owns all registered metrics and the [`Registry`] they
//! belong to. Construct it once at startup, wrap in `Arc`, and pass it
//! to the scheduler and the API state.
//!
//! Exposed at `GET /metrics` in Prometheus text exposition format
//! (`text/plain; version=0.0.4`).

use prometheus::{Counter, CounterVec, Gauge, Opts, Registry};

use crate::analytics::AnalyticsSnapshot;

/// All application-level Prometheus metrics.
pub struct AppMetrics {
    /// Total number of completed refresh cycles.
    pub refreshes_total: Counter,
    /// Reconciled quotes, labelled by origin (blended, primary_only, ...).
    pub quotes_total: CounterVec,
    /// Refreshes that had to use the fallback history model.
    pub fallback_generations_total: Counter,
    /// Latest reconciled safe-tier price in Gwei.
    pub current_safe_gas: Gauge,
    /// Latest reconciled standard-tier price in Gwei.
    pub current_standard_gas: Gauge,
    /// Number of observations in the latest series.
    pub series_points: Gauge,
    /// The registry that owns all of the above metrics.
    pub registry: Registry,
}

impl AppMetrics {
    /// Create and register all metrics.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let refreshes_total = Counter::with_opts(Opts::new(
            "eth_gas_optimizer_refreshes_total",
            "Completed analytics refresh cycles",
        ))?;

        let quotes_total = CounterVec::new(
            Opts::new(
                "eth_gas_optimizer_quotes_total",
                "Reconciled price quotes by origin",
            ),
            &["origin"],
        )?;

        let fallback_generations_total = Counter::with_opts(Opts::new(
            "eth_gas_optimizer_fallback_generations_total",
            "Refreshes that used the fallback history model",
        ))?;

        let current_safe_gas = Gauge::with_opts(Opts::new(
            "eth_gas_optimizer_current_safe_gas_gwei",
            "Latest reconciled safe gas price in Gwei",
        ))?;

        let current_standard_gas = Gauge::with_opts(Opts::new(
            "eth_gas_optimizer_current_standard_gas_gwei",
            "Latest reconciled standard gas price in Gwei",
        ))?;

        let series_points = Gauge::with_opts(Opts::new(
            "eth_gas_optimizer_series_points",
            "Observations in the latest history series",
        ))?;

        registry.register(Box::new(refreshes_total.clone()))?;
        registry.register(Box::new(quotes_total.clone()))?;
        registry.register(Box::new(fallback_generations_total.clone()))?;
        registry.register(Box::new(current_safe_gas.clone()))?;
        registry.register(Box::new(current_standard_gas.clone()))?;
        registry.register(Box::new(series_points.clone()))?;

        Ok(Self {
            refreshes_total,
            quotes_total,
            fallback_generations_total,
            current_safe_gas,
            current_standard_gas,
            series_points,
            registry,
        })
    }

    /// Record the outcome of one refresh cycle.
    pub fn record_snapshot(&self, snapshot: &AnalyticsSnapshot) {
        self.refreshes_total.inc();
        self.quotes_total
            .with_label_values(&[snapshot.quote_origin.as_str()])
            .inc();
        if snapshot.used_fallback_generator {
            self.fallback_generations_total.inc();
        }
        self.current_safe_gas.set(snapshot.quote.safe);
        self.current_standard_gas.set(snapshot.quote.standard);
        self.series_points.set(snapshot.series.len() as f64);
    }

    /// Render all metrics as Prometheus text format (for the `/metrics` endpoint).
    pub fn render(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&metric_families, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap_or_default())
    }
}
