use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use hvac_quote::workflows::leads::{lead_router, LeadRepository, LeadService};
use hvac_quote::workflows::pricing::{quote_router, QuoteService, RebateLookup};
use hvac_quote::workflows::promotions::{promo_code_router, PromoCodeRepository, PromoCodeService};
use hvac_quote::workflows::quiz::quiz_router;
use serde_json::json;
use std::sync::Arc;

/// Merges every workflow router with the operational endpoints.
pub(crate) fn with_site_routes<L, P, R>(
    quotes: Arc<QuoteService<L>>,
    promotions: Arc<PromoCodeService<P>>,
    leads: Arc<LeadService<R>>,
) -> Router
where
    L: RebateLookup + 'static,
    P: PromoCodeRepository + 'static,
    R: LeadRepository + 'static,
{
    quote_router(quotes)
        .merge(promo_code_router(promotions))
        .merge(lead_router(leads))
        .merge(quiz_router())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    if state.is_ready() {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
