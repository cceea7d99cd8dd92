//! Price source reconciliation.
//!
//! Merges the primary gas oracle (whole Gwei) and the secondary gas station
//! (tenths of a Gwei) into one quote. Every failure path resolves to a quote.

use std::sync::Arc;

use crate::analytics::{
    config::FALLBACK_QUOTE,
    error::AnalyticsError,
    provider::{GasPriceSource, ProviderResult},
    types::{PriceQuote, QuoteOrigin, Reconciliation, StationQuote},
};

/// Merge two source results into a single rounded quote.
pub fn reconcile(
    primary: ProviderResult<PriceQuote>,
    secondary: ProviderResult<StationQuote>,
) -> PriceQuote {
    reconcile_detailed(primary, secondary).quote
}

/// Same as [`reconcile`], also reporting which sources contributed.
pub fn reconcile_detailed(
    primary: ProviderResult<PriceQuote>,
    secondary: ProviderResult<StationQuote>,
) -> Reconciliation {
    let primary = primary
        .map_err(|err| AnalyticsError::source_unavailable("gas oracle", err))
        .and_then(|quote| usable(quote, "gas oracle"));
    let secondary = secondary
        .map_err(|err| AnalyticsError::source_unavailable("gas station", err))
        .and_then(|quote| usable(quote.to_gwei(), "gas station"));

    match (primary, secondary) {
        (Ok(a), Ok(b)) => Reconciliation {
            quote: PriceQuote {
                safe: (a.safe + b.safe) / 2.0,
                standard: (a.standard + b.standard) / 2.0,
                fast: (a.fast + b.fast) / 2.0,
            }
            .rounded(),
            origin: QuoteOrigin::Blended,
        },
        (Ok(a), Err(err)) => {
            tracing::warn!("{}", err);
            Reconciliation {
                quote: a.rounded(),
                origin: QuoteOrigin::PrimaryOnly,
            }
        }
        (Err(err), Ok(b)) => {
            tracing::warn!("{}", err);
            Reconciliation {
                quote: b.rounded(),
                origin: QuoteOrigin::SecondaryOnly,
            }
        }
        (Err(primary_err), Err(secondary_err)) => {
            tracing::warn!("{}", primary_err);
            tracing::warn!("{}", secondary_err);
            tracing::error!(
                "{}; using default quote {}/{}/{}",
                AnalyticsError::AllSourcesUnavailable,
                FALLBACK_QUOTE.safe,
                FALLBACK_QUOTE.standard,
                FALLBACK_QUOTE.fast,
            );
            Reconciliation {
                quote: FALLBACK_QUOTE,
                origin: QuoteOrigin::Fallback,
            }
        }
    }
}

/// Reject quotes with non-finite or negative tiers.
fn usable(quote: PriceQuote, source_name: &str) -> Result<PriceQuote, AnalyticsError> {
    let tiers = [quote.safe, quote.standard, quote.fast];
    if tiers.iter().all(|tier| tier.is_finite() && *tier >= 0.0) {
        Ok(quote)
    } else {
        Err(AnalyticsError::source_unavailable(
            source_name,
            format!("malformed quote {:?}", quote),
        ))
    }
}

/// Fetches both feeds concurrently and reconciles the results.
#[derive(Clone)]
pub struct PriceReconciler {
    primary: Arc<dyn GasPriceSource<PriceQuote>>,
    secondary: Arc<dyn GasPriceSource<StationQuote>>,
}

impl PriceReconciler {
    pub fn new(
        primary: Arc<dyn GasPriceSource<PriceQuote>>,
        secondary: Arc<dyn GasPriceSource<StationQuote>>,
    ) -> Self {
        Self { primary, secondary }
    }

    /// Fetch both feeds jointly; a failure of one never blocks the other.
    pub async fn current_price(&self) -> Reconciliation {
        let (primary, secondary) =
            tokio::join!(self.primary.fetch_quote(), self.secondary.fetch_quote());

        tracing::debug!(
            "Fetched quotes ({}: {}, {}: {})",
            self.primary.provider_name(),
            if primary.is_ok() { "ok" } else { "failed" },
            self.secondary.provider_name(),
            if secondary.is_ok() { "ok" } else { "failed" },
        );

        reconcile_detailed(primary, secondary)
    }
}
