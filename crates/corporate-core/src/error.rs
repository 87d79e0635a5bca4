use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use corporate_domain::auth::{ErrorBody, kind};

/// Common application error variants, used for router-level rejections.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("Not found")]
    NotFound,
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => kind::UNAUTHENTICATED,
            Self::NotFound => kind::NOT_FOUND,
            Self::MethodNotAllowed => kind::METHOD_NOT_ALLOWED,
            Self::Internal(_) => kind::INTERNAL,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 500s are logged here; TraceLayer records method, uri and status for every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = ErrorBody {
            status: "failed".to_owned(),
            kind: self.kind().to_owned(),
            message: self.to_string(),
            errors: None,
        };
        (status, axum::Json(body)).into_response()
    }
}

/// Router fallback: unknown paths get the JSON 404 body instead of an empty response.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Router fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
