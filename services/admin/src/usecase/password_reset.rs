use chrono::Utc;

use crate::domain::repository::{
    AccountChanges, AccountRepository, Mailer, OtpRepository, PasswordHasher, TokenRepository,
};
use crate::domain::types::{OneTimePasscode, normalize_email};
use crate::domain::validation::Validator;
use crate::error::AdminServiceError;
use crate::usecase::login::generate_code;

pub const RESET_MAIL_SUBJECT: &str = "Password reset OTP";

pub fn reset_mail_body(code: &str) -> String {
    format!("Your password reset OTP is: {code}")
}

// ── Forgot password ───────────────────────────────────────────────────────────

/// Mails a reset code when the email belongs to an account.
///
/// The outcome is the same whether or not the account exists. The code shares the
/// one-row-per-email passcode table with login, so it replaces a pending login code.
pub struct ForgotPasswordUseCase<A, O, M>
where
    A: AccountRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub accounts: A,
    pub otps: O,
    pub mailer: M,
}

impl<A, O, M> ForgotPasswordUseCase<A, O, M>
where
    A: AccountRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub async fn execute(&self, email: Option<String>) -> Result<(), AdminServiceError> {
        let mut v = Validator::new();
        let email = v.required("email", email.as_deref()).map(|e| normalize_email(&e));
        if let Some(email) = &email {
            v.email("email", email);
        }
        v.conclude()?;
        let email = email.unwrap_or_default();

        let Some(account) = self.accounts.find_by_email(&email).await? else {
            tracing::info!("password reset requested for unknown email");
            return Ok(());
        };

        let otp = OneTimePasscode {
            email: account.email.clone(),
            code: generate_code(),
            created_at: Utc::now(),
        };
        self.otps.upsert(&otp).await?;

        if let Err(e) = self
            .mailer
            .send(&account.email, RESET_MAIL_SUBJECT, &reset_mail_body(&otp.code))
            .await
        {
            tracing::warn!(account_id = %account.id, error = %e, "failed to send password reset OTP");
        }

        tracing::info!(account_id = %account.id, "password reset OTP issued");
        Ok(())
    }
}

// ── Reset password ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

pub struct ResetPasswordUseCase<A, O, T, H>
where
    A: AccountRepository,
    O: OtpRepository,
    T: TokenRepository,
    H: PasswordHasher,
{
    pub accounts: A,
    pub otps: O,
    pub tokens: T,
    pub hasher: H,
}

impl<A, O, T, H> ResetPasswordUseCase<A, O, T, H>
where
    A: AccountRepository,
    O: OtpRepository,
    T: TokenRepository,
    H: PasswordHasher,
{
    /// Sets the new password and signs the account out everywhere.
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AdminServiceError> {
        let mut v = Validator::new();
        let email = v
            .required("email", input.email.as_deref())
            .map(|e| normalize_email(&e));
        if let Some(email) = &email {
            v.email("email", email);
        }
        let code = v.required("otp", input.otp.as_deref());
        let password = input.password.filter(|p| !p.is_empty());
        match &password {
            Some(password) => {
                v.min_chars("password", password, 8);
                v.confirmed("password", password, input.password_confirmation.as_deref());
            }
            None => v.add("password", "The password field is required."),
        }
        v.conclude()?;
        let (email, code, password) = (
            email.unwrap_or_default(),
            code.unwrap_or_default(),
            password.unwrap_or_default(),
        );

        let record = self
            .otps
            .find(&email, &code)
            .await?
            .ok_or(AdminServiceError::InvalidOtp)?;
        if record.is_expired_at(Utc::now()) {
            return Err(AdminServiceError::OtpExpired);
        }

        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AdminServiceError::InvalidOtp)?;

        if !self.otps.consume(&email, &code).await? {
            return Err(AdminServiceError::InvalidOtp);
        }

        let changes = AccountChanges {
            password_hash: Some(self.hasher.hash(&password).await?),
            ..AccountChanges::default()
        };
        self.accounts
            .update(account.id, &changes)
            .await?
            .ok_or(AdminServiceError::InvalidOtp)?;

        let revoked = self.tokens.revoke_all(account.id).await?;
        tracing::info!(account_id = %account.id, revoked, "admin password reset");
        Ok(())
    }
}
