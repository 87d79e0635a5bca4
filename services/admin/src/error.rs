use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use corporate_core::error::AppError;
use corporate_domain::auth::{ErrorBody, FieldErrors, kind};

/// Admin service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("OTP session expired")]
    SessionExpired,
    #[error("Wrong OTP")]
    InvalidOtp,
    #[error("OTP expired")]
    OtpExpired,
    #[error("The given data was invalid.")]
    Validation(FieldErrors),
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AdminServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => kind::INVALID_CREDENTIALS,
            Self::SessionExpired => kind::SESSION_EXPIRED,
            Self::InvalidOtp => kind::INVALID_OTP,
            Self::OtpExpired => kind::OTP_EXPIRED,
            Self::Validation(_) => kind::VALIDATION,
            Self::Unauthenticated => kind::UNAUTHENTICATED,
            Self::NotFound(_) => kind::NOT_FOUND,
            Self::MethodNotAllowed => kind::METHOD_NOT_ALLOWED,
            Self::Internal(_) => kind::INTERNAL,
        }
    }

    /// Single-field validation failure.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_owned(), vec![message.into()]);
        Self::Validation(errors)
    }
}

impl From<AppError> for AdminServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Unauthenticated => Self::Unauthenticated,
            AppError::NotFound => Self::NotFound("Resource"),
            AppError::MethodNotAllowed => Self::MethodNotAllowed,
            AppError::Internal(e) => Self::Internal(e),
        }
    }
}

impl IntoResponse for AdminServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::SessionExpired | Self::InvalidOtp | Self::OtpExpired => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only 500s are logged here; TraceLayer records method, uri and status for every request.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let message = self.to_string();
        let kind = self.kind().to_owned();
        let errors = match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        };
        let body = ErrorBody {
            status: "failed".to_owned(),
            kind,
            message,
            errors,
        };
        (status, axum::Json(body)).into_response()
    }
}
