use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::request::QuoteRequest;
use super::service::{QuoteService, RebateLookup};

/// Raw quiz answers as the browser posts them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub system_type: Option<String>,
    #[serde(default)]
    pub rebate: Option<String>,
}

/// Router exposing the quote endpoint.
pub fn quote_router<L>(service: Arc<QuoteService<L>>) -> Router
where
    L: RebateLookup + 'static,
{
    Router::new()
        .route("/api/quotes", post(quote_handler::<L>))
        .with_state(service)
}

pub(crate) async fn quote_handler<L>(
    State(service): State<Arc<QuoteService<L>>>,
    payload: Result<axum::Json<QuoteSubmission>, JsonRejection>,
) -> Response
where
    L: RebateLookup + 'static,
{
    let submission = match payload {
        Ok(axum::Json(submission)) => submission,
        Err(rejection) => {
            let payload = json!({ "message": rejection.body_text() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let request = QuoteRequest::from_raw(
        submission.priority.as_deref(),
        submission.size.as_deref(),
        submission.system_type.as_deref(),
    );
    let sheet = service.quote(&request, submission.rebate.as_deref());

    (StatusCode::OK, axum::Json(sheet)).into_response()
}
