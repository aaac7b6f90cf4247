use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_adoption_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use pawpath::config::AppConfig;
use pawpath::error::AppError;
use pawpath::storage::{JsonFileStore, KeyValueStore, MemoryStore};
use pawpath::telemetry;
use pawpath::workflows::adoption::applications::AdoptionApplicationService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(data_dir) = args.data_dir.take() {
        config.storage.data_dir = Some(data_dir);
    }

    telemetry::init(&config.telemetry)?;

    match config.storage.data_dir.clone() {
        Some(data_dir) => {
            info!(data_dir = %data_dir.display(), "persisting adoption data to disk");
            serve(config, Arc::new(JsonFileStore::new(data_dir))).await
        }
        None => {
            warn!("APP_DATA_DIR not set; adoption data is kept in memory only");
            serve(config, Arc::new(MemoryStore::default())).await
        }
    }
}

async fn serve<S>(config: AppConfig, store: Arc<S>) -> Result<(), AppError>
where
    S: KeyValueStore + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(
        AdoptionApplicationService::new(store).with_match_limit(config.matching.default_limit),
    );

    let app = with_adoption_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pawpath adoption service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
