use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use wildseries_core::error::{ApiError, ErrorEnvelope};

use crate::views;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
///
/// Renders as an HTML error page; used by every browser-facing route.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if let ApiError::Internal(message) = &self.0 {
            tracing::error!(error = %message, "request failed");
        }
        (status, views::error_page(status.as_u16(), self.0.title(), &self.0.to_string()))
            .into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        Self(ApiError::Internal(format!("db error: {e}")))
    }
}

impl From<wildseries_db::DbError> for AppError {
    fn from(e: wildseries_db::DbError) -> Self {
        Self(ApiError::Internal(e.to_string()))
    }
}

/// Same errors rendered as the JSON envelope, for the machine-facing routes.
#[derive(Debug)]
pub struct JsonError(pub ApiError);

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        let status = status_of(&self.0);
        if let ApiError::Internal(message) = &self.0 {
            tracing::error!(error = %message, "request failed");
        }
        (status, Json(ErrorEnvelope::from(&self.0))).into_response()
    }
}

impl From<ApiError> for JsonError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

fn status_of(e: &ApiError) -> StatusCode {
    StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
