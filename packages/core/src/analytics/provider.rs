//! Gas price source interface
//!
//! Abstracts the upstream feeds so the reconciler can be driven by real
//! HTTP clients or in-memory mocks.

use async_trait::async_trait;

use crate::analytics::error::ProviderError;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// An upstream feed producing quotes of type `Q`.
#[async_trait]
pub trait GasPriceSource<Q: Send + 'static>: Send + Sync {
    /// Fetch the current quote from the feed
    async fn fetch_quote(&self) -> ProviderResult<Q>;

    /// Name used in logs
    fn provider_name(&self) -> &str;
}
