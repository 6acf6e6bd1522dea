//! API errors and their HTTP rendering
//!
//! Every error leaves the server as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use refuge_usecase::SurvivorError;

use super::dto::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure reported by a use case
    #[error(transparent)]
    Survivor(#[from] SurvivorError),

    /// Request could not be read (bad path or body)
    #[error("{message}")]
    BadRequest { message: String },

    /// Nothing to show
    #[error("{message}")]
    NotFound { message: String },

    /// Failure inside the server itself
    #[error("{message}")]
    Internal { message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Survivor(err) => match err {
                SurvivorError::NotFound { .. } => StatusCode::NOT_FOUND,
                SurvivorError::Conflict { .. } => StatusCode::CONFLICT,
                SurvivorError::AlreadyInfected { .. } => StatusCode::CONFLICT,
                SurvivorError::Validation { .. } => StatusCode::BAD_REQUEST,
                SurvivorError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SurvivorError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            },
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
