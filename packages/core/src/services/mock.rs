//! In-memory price source for tests and local runs without network access.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::analytics::{
    error::ProviderError,
    provider::{GasPriceSource, ProviderResult},
};

/// Returns a fixed quote or a fixed network error, counting calls.
#[derive(Clone)]
pub struct MockGasSource<Q> {
    response: Result<Q, String>,
    calls: Arc<AtomicUsize>,
}

impl<Q> MockGasSource<Q> {
    pub fn with_quote(quote: Q) -> Self {
        Self {
            response: Ok(quote),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            response: Err(reason.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<Q> GasPriceSource<Q> for MockGasSource<Q>
where
    Q: Clone + Send + Sync + 'static,
{
    async fn fetch_quote(&self) -> ProviderResult<Q> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(ProviderError::network)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
