use crate::cli::ServeArgs;
use crate::infra::{seeded_readers, AppState};
use crate::routes::with_admission_routes;
use admission_fit::admissions::AdmissionFitService;
use admission_fit::config::AppConfig;
use admission_fit::error::AppError;
use admission_fit::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

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

    let (records, schools, targets) = seeded_readers();
    let fit_service = Arc::new(AdmissionFitService::new(
        Arc::new(records),
        Arc::new(schools),
        Arc::new(targets),
        config.fit.clone(),
    ));

    let app = with_admission_routes(fit_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_threshold = config.fit.default_threshold,
        "admission fit service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
