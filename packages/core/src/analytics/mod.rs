//! Gas Price Analytics
//!
//! Reconciles the current price from two upstream feeds, synthesises an
//! hourly fee history, smooths it for display and ranks the cheapest hours
//! and days to transact.

pub mod aggregator;
pub mod calendar;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod optimizer;
pub mod provider;
pub mod reconciler;
pub mod smoother;
pub mod timeframe;
pub mod types;

pub use aggregator::aggregate;
pub use config::AnalyticsConfig;
pub use engine::{GasAnalyticsEngine, SnapshotSlot};
pub use error::{AnalyticsError, ProviderError};
pub use optimizer::project_next;
pub use reconciler::{reconcile, PriceReconciler};
pub use smoother::smooth;
pub use timeframe::TimeFrame;
pub use types::*;
