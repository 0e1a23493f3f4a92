use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use volunteer_ops::config::AppConfig;
use volunteer_ops::error::AppError;
use volunteer_ops::telemetry;
use volunteer_ops::workflows::recruitment::{PipelineBoard, PipelineService};

use crate::cli::ServeArgs;
use crate::infra::{seed_candidates, seed_directory, AppState, InMemoryStatusPersistence};
use crate::routes::with_portal_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let board = PipelineBoard::seeded(seed_candidates())?;
    let pipeline = Arc::new(PipelineService::new(
        board,
        Arc::new(InMemoryStatusPersistence::default()),
        config.pipeline.persist_timeout(),
    ));
    let directory = Arc::new(seed_directory());

    let app = with_portal_routes(pipeline, directory)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "volunteer operations portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
