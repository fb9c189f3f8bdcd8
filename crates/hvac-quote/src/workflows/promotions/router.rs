use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{AmountError, NewPromoCode, PromoCodeId, PromoCodeUpdate};
use super::repository::PromoCodeRepository;
use super::service::{PromoCodeError, PromoCodeService};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PromoCodeQuery {
    #[serde(default)]
    pub(crate) code: Option<String>,
}

/// Router builder exposing the promo code admin and lookup endpoints.
pub fn promo_code_router<R>(service: Arc<PromoCodeService<R>>) -> Router
where
    R: PromoCodeRepository + 'static,
{
    Router::new()
        .route(
            "/api/promoCodes",
            get(index_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/api/promoCodes/:key",
            get(lookup_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

/// Lists every record, or validates a single code when `?code=` is present.
pub(crate) async fn index_handler<R>(
    State(service): State<Arc<PromoCodeService<R>>>,
    Query(query): Query<PromoCodeQuery>,
) -> Response
where
    R: PromoCodeRepository + 'static,
{
    match query.code.filter(|code| !code.trim().is_empty()) {
        Some(code) => match service.find_active(&code) {
            Ok(Some(promo)) => {
                let payload = json!({ "rebate": promo.amount, "code": promo.code });
                (StatusCode::OK, axum::Json(payload)).into_response()
            }
            Ok(None) => message(StatusCode::NOT_FOUND, "Invalid or inactive promo code"),
            Err(err) => error_response(err),
        },
        None => match service.list() {
            Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
            Err(err) => error_response(err),
        },
    }
}

pub(crate) async fn lookup_handler<R>(
    State(service): State<Arc<PromoCodeService<R>>>,
    Path(code): Path<String>,
) -> Response
where
    R: PromoCodeRepository + 'static,
{
    match service.find_active(&code) {
        Ok(Some(promo)) => {
            let payload = json!({
                "id": promo.id,
                "code": promo.code,
                "rebate": promo.amount,
                "description": promo.description,
                "status": promo.status_label(),
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) => message(StatusCode::NOT_FOUND, "Promo code not found or inactive"),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<PromoCodeService<R>>>,
    payload: Result<axum::Json<NewPromoCode>, JsonRejection>,
) -> Response
where
    R: PromoCodeRepository + 'static,
{
    let Ok(axum::Json(request)) = payload else {
        return message(StatusCode::BAD_REQUEST, "Invalid promo code data");
    };

    match service.create(request) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<PromoCodeService<R>>>,
    Path(key): Path<String>,
    payload: Result<axum::Json<PromoCodeUpdate>, JsonRejection>,
) -> Response
where
    R: PromoCodeRepository + 'static,
{
    let Some(id) = parse_id(&key) else {
        return message(StatusCode::BAD_REQUEST, "Invalid ID");
    };
    let Ok(axum::Json(update)) = payload else {
        return message(StatusCode::BAD_REQUEST, "Invalid update data");
    };

    match service.update(id, update) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<PromoCodeService<R>>>,
    Path(key): Path<String>,
) -> Response
where
    R: PromoCodeRepository + 'static,
{
    let Some(id) = parse_id(&key) else {
        return message(StatusCode::BAD_REQUEST, "Invalid ID");
    };

    match service.delete(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn parse_id(raw: &str) -> Option<PromoCodeId> {
    raw.trim().parse::<u64>().ok().map(PromoCodeId)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, axum::Json(json!({ "message": text }))).into_response()
}

fn error_response(err: PromoCodeError) -> Response {
    match err {
        PromoCodeError::InvalidCode => message(StatusCode::BAD_REQUEST, "Invalid promo code data"),
        PromoCodeError::Amount(AmountError::ExceedsCap(_)) => {
            message(StatusCode::BAD_REQUEST, "Rebate capped at $1000")
        }
        PromoCodeError::Amount(AmountError::Negative(_)) => {
            message(StatusCode::BAD_REQUEST, "Rebate amount cannot be negative")
        }
        PromoCodeError::Conflict(_) => message(StatusCode::CONFLICT, "Promo code already exists"),
        PromoCodeError::NotFound(_) => message(StatusCode::NOT_FOUND, "Promo code not found"),
        PromoCodeError::Repository(err) => {
            error!(error = %err, "promo code repository failure");
            message(StatusCode::INTERNAL_SERVER_ERROR, "Promo code store unavailable")
        }
    }
}
