use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;

use corporate_domain::account::{AccountProfile, AccountSummary};
use corporate_domain::auth::{
    ErrorBody, LoginResponse, MeResponse, MessageResponse, ProfileResponse, RegisterResponse,
    VerifyOtpResponse,
};

use crate::context::AuthContext;
use crate::error::ClientError;
use crate::upload::FileUpload;

/// Admin API client. Clones share one connection pool and cookie jar.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct VerifyOtpBody<'a> {
    otp: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordBody<'a> {
    email: &'a str,
}

/// A reset code from the forgot-password mail plus the new password.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub avatar: Option<FileUpload>,
}

/// Fields of a profile update; at least one must be set.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<FileUpload>,
}

/// Decode a JSON success body, or map the error body to a [`ClientError`].
pub(crate) async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if status.is_success() {
        return Ok(serde_json::from_slice(&bytes)?);
    }
    tracing::debug!(status = status.as_u16(), "request failed");
    match serde_json::from_slice::<ErrorBody>(&bytes) {
        Ok(body) => Err(ClientError::from_body(status.as_u16(), body)),
        Err(_) => Err(ClientError::Server {
            status: status.as_u16(),
            message: String::from_utf8_lossy(&bytes).into_owned(),
        }),
    }
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    pub(crate) fn bearer(ctx: &AuthContext) -> Result<&str, ClientError> {
        ctx.token().ok_or(ClientError::Unauthenticated)
    }

    /// Check the password. On success the server has mailed a passcode and set the
    /// pending-login cookie in this client's jar.
    pub async fn login(&self, email: &str, password: &str) -> Result<PendingLogin, ClientError> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&LoginBody { email, password })
            .send()
            .await?;
        let body: LoginResponse = decode(response).await?;
        tracing::debug!(step = %body.step, "password accepted");
        Ok(PendingLogin {
            client: self.clone(),
            email: email.to_owned(),
        })
    }

    async fn verify_otp(&self, otp: &str) -> Result<AuthContext, ClientError> {
        let response = self
            .http
            .post(self.url("/login/verify-otp"))
            .json(&VerifyOtpBody { otp })
            .send()
            .await?;
        let body: VerifyOtpResponse = decode(response).await?;
        Ok(AuthContext::authenticated(body.token, body.admin))
    }

    /// Create an account and sign in as it.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthContext, ClientError> {
        let mut form = Form::new()
            .text("name", request.name)
            .text("email", request.email)
            .text("password", request.password)
            .text("password_confirmation", request.password_confirmation);
        if let Some(avatar) = request.avatar {
            form = form.part("avatar", avatar.into_part()?);
        }
        let response = self
            .http
            .post(self.url("/register"))
            .multipart(form)
            .send()
            .await?;
        let body: RegisterResponse = decode(response).await?;
        Ok(AuthContext::authenticated(
            body.token,
            AccountSummary::from(&body.user),
        ))
    }

    /// Ask for a reset code. Succeeds for unknown emails too; returns the server's message.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/forgot-password"))
            .json(&ForgotPasswordBody { email })
            .send()
            .await?;
        let body: MessageResponse = decode(response).await?;
        Ok(body.message)
    }

    /// Set a new password with a mailed code. Every session of the account ends.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<String, ClientError> {
        let response = self
            .http
            .post(self.url("/reset-password"))
            .json(request)
            .send()
            .await?;
        let body: MessageResponse = decode(response).await?;
        tracing::debug!("password reset");
        Ok(body.message)
    }

    pub async fn me(&self, ctx: &AuthContext) -> Result<AccountProfile, ClientError> {
        let response = self
            .http
            .get(self.url("/admin/me"))
            .bearer_auth(Self::bearer(ctx)?)
            .send()
            .await?;
        let body: MeResponse = decode(response).await?;
        Ok(body.user)
    }

    /// Revoke every token of the account and clear `ctx`. A token the server no longer
    /// knows counts as logged out.
    pub async fn logout(&self, ctx: &mut AuthContext) -> Result<(), ClientError> {
        let Some(token) = ctx.token().map(str::to_owned) else {
            return Ok(());
        };
        ctx.clear();
        let response = self
            .http
            .post(self.url("/admin/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        match decode::<MessageResponse>(response).await {
            Ok(_) | Err(ClientError::Unauthenticated) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Update name and/or avatar. The cached profile in `ctx` follows the change.
    pub async fn update_profile(
        &self,
        ctx: &mut AuthContext,
        update: ProfileUpdate,
    ) -> Result<AccountProfile, ClientError> {
        let mut form = Form::new();
        if let Some(name) = update.name {
            form = form.text("name", name);
        }
        if let Some(avatar) = update.avatar {
            form = form.part("avatar", avatar.into_part()?);
        }
        let response = self
            .http
            .post(self.url("/profile/update"))
            .bearer_auth(Self::bearer(ctx)?)
            .multipart(form)
            .send()
            .await?;
        let body: ProfileResponse = decode(response).await?;
        ctx.set_admin(AccountSummary::from(&body.admin));
        Ok(body.admin)
    }
}

/// A login waiting for its passcode.
#[derive(Debug)]
pub struct PendingLogin {
    client: ApiClient,
    email: String,
}

/// Why [`PendingLogin::verify`] failed and whether the same pending login can be retried.
#[derive(Debug)]
pub enum VerifyFailure {
    /// Wrong or malformed code, or the request never reached the server.
    Retry(PendingLogin, ClientError),
    /// The passcode or the pending session expired; log in again.
    Restart(ClientError),
}

impl VerifyFailure {
    pub fn error(&self) -> &ClientError {
        match self {
            Self::Retry(_, e) | Self::Restart(e) => e,
        }
    }
}

impl PendingLogin {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub async fn verify(self, otp: &str) -> Result<AuthContext, VerifyFailure> {
        let result = self.client.verify_otp(otp).await;
        match result {
            Ok(ctx) => {
                tracing::debug!(email = %self.email, "login complete");
                Ok(ctx)
            }
            Err(
                e @ (ClientError::InvalidOtp(_)
                | ClientError::Validation { .. }
                | ClientError::Http(_)),
            ) => Err(VerifyFailure::Retry(self, e)),
            Err(e) => Err(VerifyFailure::Restart(e)),
        }
    }
}
