use crate::infrastructure::error::StorageError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::error;
use serde::Serialize;

pub mod healthz;
pub mod interactions;

/// All routes, without the DI provider attached.
pub fn router() -> Router {
    Router::new()
        .route("/healthz", get(healthz::get_health))
        .nest("/interactions", interactions::router())
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation { status: StatusCode, message: String },
    #[error("Interaction not found.")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Serialize, Debug)]
pub struct ErrorDetail {
    pub detail: String,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();

        let status = match self {
            ApiError::Validation { status, .. } => status,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(e) => {
                error!("{e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorDetail { detail })).into_response()
    }
}
