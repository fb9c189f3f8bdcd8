use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryLeadRepository, InMemoryPromoCodeRepository};
use crate::routes::with_site_routes;
use axum::{Extension, Router};
use axum_prometheus::PrometheusMetricLayer;
use hvac_quote::config::AppConfig;
use hvac_quote::error::AppError;
use hvac_quote::telemetry;
use hvac_quote::workflows::leads::LeadService;
use hvac_quote::workflows::pricing::QuoteService;
use hvac_quote::workflows::promotions::PromoCodeService;
use std::sync::Arc;
use tracing::info;

/// Wires the in-memory stores, services and routers for one process.
pub fn build_app(config: &AppConfig, state: AppState) -> Result<Router, AppError> {
    let engine = Arc::new(config.pricing.build_engine()?);

    let promotions = Arc::new(PromoCodeService::new(Arc::new(
        InMemoryPromoCodeRepository::default(),
    )));
    if config.promotions.seed_defaults {
        let seeded = promotions.seed_defaults()?;
        info!(seeded, "default promo codes loaded");
    }

    let quotes = Arc::new(QuoteService::new(engine, promotions.clone()));
    let leads = Arc::new(LeadService::new(Arc::new(InMemoryLeadRepository::default())));

    Ok(with_site_routes(quotes, promotions, leads).layer(Extension(state)))
}

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
    let app_state = AppState::new(prometheus_handle);

    let app = build_app(&config, app_state.clone())?.layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    app_state.mark_ready();

    info!(
        ?config.environment,
        %addr,
        platinum_policy = ?config.pricing.platinum_policy,
        "hvac quote site ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
