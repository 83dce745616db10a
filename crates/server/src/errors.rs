use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::debug;

/// Errors a handler can answer with. The display text is the client-facing
/// `message` field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Dados inválidos")]
    Validation,
    #[error("Usuário não encontrado")]
    NotFound,
    #[error("ID já existe")]
    Conflict,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(serde_json::json!({"message": self.to_string()}))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        debug!(error = %e, "request rejected");
        match e {
            ServiceError::Model(_) => ApiError::Validation,
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Conflict(_) => ApiError::Conflict,
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
}
