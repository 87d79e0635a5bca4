use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::cookie::SignedCookieJar;
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart, TypedMultipartError};
use bytes::Bytes;
use serde::Deserialize;

use corporate_auth_types::cookie::{
    clear_pending_login_cookie, pending_login_email, set_pending_login_cookie,
};
use corporate_domain::auth::{
    LoginResponse, MeResponse, MessageResponse, RegisterResponse, STEP_OTP_REQUIRED,
    VerifyOtpResponse,
};

use crate::error::AdminServiceError;
use crate::extract::CurrentAdmin;
use crate::handlers::{form_body, json_body, upload};
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::password_reset::{
    ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
};
use crate::usecase::register::{RegisterInput, RegisterUseCase};
use crate::usecase::session::LogoutUseCase;
use crate::usecase::verify_otp::{VerifyOtpInput, VerifyOtpUseCase};

// ── POST /api/login ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let body = json_body(body)?;
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
        otps: state.otp_repo(),
        hasher: state.hasher.clone(),
        mailer: state.mailer.clone(),
    };

    let pending = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_pending_login_cookie(jar, pending.email, state.cookie_secure);
    let body = LoginResponse {
        status: "success".to_owned(),
        message: "OTP sent to your email".to_owned(),
        step: STEP_OTP_REQUIRED.to_owned(),
    };
    Ok((jar, Json(body)))
}

// ── POST /api/login/verify-otp ────────────────────────────────────────────────

/// The admin panel sends the code as typed; a numeric JSON value is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum OtpValue {
    Text(String),
    Number(u64),
}

impl OtpValue {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub otp: Option<OtpValue>,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    body: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let body = json_body(body)?;
    let usecase = VerifyOtpUseCase {
        accounts: state.account_repo(),
        otps: state.otp_repo(),
        tokens: state.token_repo(),
    };

    let out = usecase
        .execute(VerifyOtpInput {
            email: pending_login_email(&jar),
            otp: body.otp.map(OtpValue::into_string),
        })
        .await?;

    let jar = clear_pending_login_cookie(jar, state.cookie_secure);
    let body = VerifyOtpResponse {
        status: "success".to_owned(),
        message: "Login successful".to_owned(),
        token: out.token,
        admin: out.account.summary(),
    };
    Ok((jar, Json(body)))
}

// ── POST /api/register ────────────────────────────────────────────────────────

#[derive(TryFromMultipart)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    #[form_data(limit = "unlimited")]
    pub avatar: Option<FieldData<Bytes>>,
}

pub async fn register(
    State(state): State<AppState>,
    form: Result<TypedMultipart<RegisterForm>, TypedMultipartError>,
) -> Result<impl IntoResponse, AdminServiceError> {
    let form = form_body(form)?;
    let usecase = RegisterUseCase {
        accounts: state.account_repo(),
        tokens: state.token_repo(),
        hasher: state.hasher.clone(),
        files: state.files.clone(),
    };

    let out = usecase
        .execute(RegisterInput {
            name: form.name,
            email: form.email,
            password: form.password,
            password_confirmation: form.password_confirmation,
            avatar: upload(form.avatar),
        })
        .await?;

    let body = RegisterResponse {
        status: "success".to_owned(),
        message: "Registration successful".to_owned(),
        token: out.token,
        user: out.account.profile(&state.urls),
    };
    Ok((StatusCode::CREATED, Json(body)))
}

// ── GET /api/admin/me ─────────────────────────────────────────────────────────

pub async fn me(
    State(state): State<AppState>,
    CurrentAdmin(account): CurrentAdmin,
) -> Json<MeResponse> {
    Json(MeResponse {
        status: "success".to_owned(),
        user: account.profile(&state.urls),
    })
}

// ── POST /api/admin/logout ────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    CurrentAdmin(account): CurrentAdmin,
) -> Result<Json<MessageResponse>, AdminServiceError> {
    let usecase = LogoutUseCase {
        tokens: state.token_repo(),
    };
    usecase.execute(&account).await?;
    Ok(Json(MessageResponse::success("Logout success")))
}

// ── POST /api/forgot-password ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    body: Result<Json<ForgotPasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AdminServiceError> {
    let body = json_body(body)?;
    let usecase = ForgotPasswordUseCase {
        accounts: state.account_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
    };
    usecase.execute(body.email).await?;
    Ok(Json(MessageResponse::success(
        "If the email is registered, a password reset OTP has been sent",
    )))
}

// ── POST /api/reset-password ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub otp: Option<OtpValue>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_confirmation: Option<String>,
}

pub async fn reset_password(
    State(state): State<AppState>,
    body: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AdminServiceError> {
    let body = json_body(body)?;
    let usecase = ResetPasswordUseCase {
        accounts: state.account_repo(),
        otps: state.otp_repo(),
        tokens: state.token_repo(),
        hasher: state.hasher.clone(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            otp: body.otp.map(OtpValue::into_string),
            password: body.password,
            password_confirmation: body.password_confirmation,
        })
        .await?;
    Ok(Json(MessageResponse::success("Password has been reset")))
}
