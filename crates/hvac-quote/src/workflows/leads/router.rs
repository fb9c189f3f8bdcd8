use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::LeadSubmission;
use super::repository::LeadRepository;
use super::service::{LeadError, LeadService};

pub fn lead_router<R>(service: Arc<LeadService<R>>) -> Router
where
    R: LeadRepository + 'static,
{
    Router::new()
        .route("/api/leads", post(submit_handler::<R>).get(list_handler::<R>))
        .with_state(service)
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    payload: Result<axum::Json<LeadSubmission>, JsonRejection>,
) -> Response
where
    R: LeadRepository + 'static,
{
    let Ok(axum::Json(submission)) = payload else {
        let body = json!({ "message": "Invalid lead data" });
        return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
    };

    match service.submit(submission) {
        Ok(lead) => (StatusCode::CREATED, axum::Json(lead)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<LeadService<R>>>) -> Response
where
    R: LeadRepository + 'static,
{
    match service.list() {
        Ok(leads) => (StatusCode::OK, axum::Json(leads)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: LeadError) -> Response {
    match err {
        LeadError::Invalid(invalid) => {
            let body = json!({
                "message": invalid.message,
                "field": invalid.field.as_str(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
        }
        LeadError::Repository(err) => {
            error!(error = %err, "lead repository failure");
            let body = json!({ "message": "Lead store unavailable" });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
        }
    }
}
