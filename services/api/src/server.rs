use crate::cli::ServeArgs;
use crate::infra::{load_school_payloads, seed_schools, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use school_locator::config::AppConfig;
use school_locator::error::AppError;
use school_locator::schools::{InMemorySchoolRepository, SchoolService};
use school_locator::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySchoolRepository::default());
    let school_service = Arc::new(SchoolService::new(repository));

    if let Some(path) = args.seed.take() {
        let payloads = load_school_payloads(&path)?;
        let seeded = seed_schools(&school_service, &payloads)?;
        info!(count = seeded.len(), path = %path.display(), "seeded school store");
    }

    let app = with_operational_routes(school_service)
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "school locator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
