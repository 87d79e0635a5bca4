use chrono::Utc;
use rand::RngExt;

use crate::domain::repository::{AccountRepository, Mailer, OtpRepository, PasswordHasher};
use crate::domain::types::{OTP_MAX, OTP_MIN, OneTimePasscode, normalize_email};
use crate::domain::validation::Validator;
use crate::error::AdminServiceError;

pub const OTP_MAIL_SUBJECT: &str = "Login OTP";

/// Argon2id hash with default parameters that no password matches.
/// Verified against when the email is unknown so both rejections cost one hash.
pub const UNKNOWN_ACCOUNT_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$Fa7H4MrBgF3mh0r4SubQ7A$QQ2D8DIGc5PxUovjg/zNm+11epHKCrHWB6w9KxwVyjA";

pub(crate) fn generate_code() -> String {
    let mut rng = rand::rng();
    rng.random_range(OTP_MIN..=OTP_MAX).to_string()
}

pub fn otp_mail_body(code: &str) -> String {
    format!("Your login OTP is: {code}")
}

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// A password check that passed; the email goes into the pending-login cookie.
#[derive(Debug)]
pub struct PendingLogin {
    pub email: String,
}

pub struct LoginUseCase<A, O, H, M>
where
    A: AccountRepository,
    O: OtpRepository,
    H: PasswordHasher,
    M: Mailer,
{
    pub accounts: A,
    pub otps: O,
    pub hasher: H,
    pub mailer: M,
}

impl<A, O, H, M> LoginUseCase<A, O, H, M>
where
    A: AccountRepository,
    O: OtpRepository,
    H: PasswordHasher,
    M: Mailer,
{
    pub async fn execute(&self, input: LoginInput) -> Result<PendingLogin, AdminServiceError> {
        // 1. Validate the form → 422
        let mut v = Validator::new();
        let email = v.required("email", input.email.as_deref());
        if let Some(email) = &email {
            v.email("email", email);
        }
        let password = v.required("password", input.password.as_deref());
        v.conclude()?;
        let (email, password) = (email.unwrap_or_default(), password.unwrap_or_default());

        // 2. Check credentials → 401 for unknown account or wrong password alike
        let Some(account) = self.accounts.find_by_email(&normalize_email(&email)).await? else {
            let _ = self.hasher.verify(&password, UNKNOWN_ACCOUNT_HASH).await;
            return Err(AdminServiceError::InvalidCredentials);
        };
        if !self.hasher.verify(&password, &account.password_hash).await? {
            return Err(AdminServiceError::InvalidCredentials);
        }

        // 3. Replace any earlier passcode for this email
        let otp = OneTimePasscode {
            email: account.email.clone(),
            code: generate_code(),
            created_at: Utc::now(),
        };
        self.otps.upsert(&otp).await?;

        // 4. Mail the code; delivery failure does not fail the login
        if let Err(e) = self
            .mailer
            .send(&account.email, OTP_MAIL_SUBJECT, &otp_mail_body(&otp.code))
            .await
        {
            tracing::warn!(account_id = %account.id, error = %e, "failed to send login OTP");
        }

        tracing::info!(account_id = %account.id, "login OTP issued");
        Ok(PendingLogin {
            email: account.email,
        })
    }
}
