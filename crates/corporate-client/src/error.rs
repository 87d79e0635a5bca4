use corporate_domain::auth::{ErrorBody, FieldErrors, kind};

/// Client-side view of a failed call. Server failures map one-to-one from the `kind` field.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    SessionExpired(String),
    #[error("{0}")]
    InvalidOtp(String),
    #[error("{0}")]
    OtpExpired(String),
    #[error("{message}")]
    Validation {
        message: String,
        errors: FieldErrors,
    },
    #[error("Unauthenticated")]
    Unauthenticated,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    MethodNotAllowed(String),
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Map a decoded error body to its variant.
    pub fn from_body(status: u16, body: ErrorBody) -> Self {
        match body.kind.as_str() {
            kind::INVALID_CREDENTIALS => Self::InvalidCredentials(body.message),
            kind::SESSION_EXPIRED => Self::SessionExpired(body.message),
            kind::INVALID_OTP => Self::InvalidOtp(body.message),
            kind::OTP_EXPIRED => Self::OtpExpired(body.message),
            kind::VALIDATION => Self::Validation {
                message: body.message,
                errors: body.errors.unwrap_or_default(),
            },
            kind::UNAUTHENTICATED => Self::Unauthenticated,
            kind::NOT_FOUND => Self::NotFound(body.message),
            kind::METHOD_NOT_ALLOWED => Self::MethodNotAllowed(body.message),
            _ => Self::Server {
                status,
                message: body.message,
            },
        }
    }

    /// Messages for one form field, empty unless this is a validation failure.
    pub fn field_errors(&self, field: &str) -> &[String] {
        match self {
            Self::Validation { errors, .. } => errors.get(field).map(Vec::as_slice).unwrap_or(&[]),
            _ => &[],
        }
    }
}
