use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::pricing::CostTableError;
use crate::workflows::promotions::PromoCodeError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Process-level failure surfaced by `main` or a startup step.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    CostTable(CostTableError),
    PromoCode(PromoCodeError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::CostTable(err) => write!(f, "dealer cost table error: {}", err),
            AppError::PromoCode(err) => write!(f, "promo code error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::CostTable(err) => Some(err),
            AppError::PromoCode(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::PromoCode(PromoCodeError::InvalidCode | PromoCodeError::Amount(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::PromoCode(PromoCodeError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::PromoCode(PromoCodeError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::CostTable(_)
            | AppError::PromoCode(PromoCodeError::Repository(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CostTableError> for AppError {
    fn from(value: CostTableError) -> Self {
        Self::CostTable(value)
    }
}

impl From<PromoCodeError> for AppError {
    fn from(value: PromoCodeError) -> Self {
        Self::PromoCode(value)
    }
}
