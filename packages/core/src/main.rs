use std::env;
use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use eth_gas_optimizer::analytics::{AnalyticsConfig, GasAnalyticsEngine, PriceReconciler};
use eth_gas_optimizer::api::{self, AppState};
use eth_gas_optimizer::cli::Cli;
use eth_gas_optimizer::config::Config;
use eth_gas_optimizer::error::AppError;
use eth_gas_optimizer::logging::{init_logging, LogFormat};
use eth_gas_optimizer::metrics::AppMetrics;
use eth_gas_optimizer::scheduler::run_refresh_loop;
use eth_gas_optimizer::services::{etherscan::EtherscanClient, gas_station::GasStationClient};

#[tokio::main]
async fn main() {
    dotenv().ok();
    let log_format = env::var("LOG_FORMAT")
        .ok()
        .and_then(|raw| raw.parse::<LogFormat>().ok())
        .unwrap_or_default();
    init_logging(log_format);

    let cli = Cli::parse();
    let config = Config::from_env()
        .and_then(|config| config.apply_cli(&cli))
        .map_err(AppError::Config)
        .unwrap_or_else(|err| {
            tracing::error!("{}", err);
            std::process::exit(1);
        });

    tracing::info!("Service started with config: {:?}", config);

    if let Err(err) = run(config).await {
        tracing::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    let reconciler = PriceReconciler::new(
        Arc::new(EtherscanClient::new(
            config.etherscan_url.clone(),
            config.etherscan_api_key.clone(),
        )),
        Arc::new(GasStationClient::new(config.gas_station_url.clone())),
    );
    let engine = Arc::new(GasAnalyticsEngine::new(
        AnalyticsConfig::default().with_history_days(config.history_days),
        reconciler,
    ));
    let metrics = Arc::new(AppMetrics::new().map_err(|err| AppError::Metrics(err.to_string()))?);
    let snapshot = Arc::new(RwLock::new(None));

    let scheduler = tokio::spawn(run_refresh_loop(
        engine.clone(),
        snapshot.clone(),
        metrics.clone(),
        config.refresh_interval_seconds,
    ));

    let app = api::create_router(Arc::new(AppState {
        engine,
        snapshot,
        metrics,
    }))
    .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|err| AppError::Server(format!("Failed to bind {}: {}", addr, err)))?;
    tracing::info!("API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|err| AppError::Server(err.to_string()))?;

    if let Err(err) = scheduler.await {
        tracing::warn!("Refresh task ended abnormally: {}", err);
    }

    Ok(())
}
