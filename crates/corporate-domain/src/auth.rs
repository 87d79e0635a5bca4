//! Request/response bodies of the authentication endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::account::{AccountProfile, AccountSummary};

/// Name of the pending-login cookie carrying the email between login and OTP verification.
pub const PENDING_LOGIN_COOKIE: &str = "otp_login_email";

/// OTP and pending-login cookie lifetime in seconds (5 minutes).
pub const OTP_TTL_SECS: i64 = 300;

/// `step` value returned by a successful password check.
pub const STEP_OTP_REQUIRED: &str = "otp_required";

/// Stable error `kind` strings shared by the server responses and the client mapping.
pub mod kind {
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const SESSION_EXPIRED: &str = "SESSION_EXPIRED";
    pub const INVALID_OTP: &str = "INVALID_OTP";
    pub const OTP_EXPIRED: &str = "OTP_EXPIRED";
    pub const VALIDATION: &str = "VALIDATION";
    pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Per-field validation messages, keyed by form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Body of every failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_owned(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    pub message: String,
    pub step: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub status: String,
    pub message: String,
    pub token: String,
    pub admin: AccountSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub status: String,
    pub message: String,
    pub token: String,
    pub user: AccountProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    pub status: String,
    pub user: AccountProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub status: String,
    pub message: String,
    pub admin: AccountProfile,
}
