use crate::cli::ServeArgs;
use crate::infra::{artifact_dir, assessment_service, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use glycorisk::config::AppConfig;
use glycorisk::error::AppError;
use glycorisk::telemetry;
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
    let dir = artifact_dir(&config.model, args.model_dir.take());

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let service = Arc::new(assessment_service(&config.model, &dir));
    let model_ready = service.is_ready();

    let app = with_service_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(model_ready, Ordering::Release);

    if model_ready {
        info!(?config.environment, %addr, dir = %dir.display(), "risk assessment service ready");
    } else {
        warn!(?config.environment, %addr, dir = %dir.display(), "serving without a model; assessments return 503");
    }

    axum::serve(listener, app).await?;
    Ok(())
}
