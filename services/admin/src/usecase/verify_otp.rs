use chrono::Utc;

use crate::domain::repository::{AccountRepository, OtpRepository, TokenRepository};
use crate::domain::types::Account;
use crate::domain::validation::Validator;
use crate::error::AdminServiceError;
use crate::usecase::session::issue_token;

pub struct VerifyOtpInput {
    /// Email from the pending-login cookie; `None` when the cookie is absent or forged.
    pub email: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub token: String,
    pub account: Account,
}

pub struct VerifyOtpUseCase<A, O, T>
where
    A: AccountRepository,
    O: OtpRepository,
    T: TokenRepository,
{
    pub accounts: A,
    pub otps: O,
    pub tokens: T,
}

impl<A, O, T> VerifyOtpUseCase<A, O, T>
where
    A: AccountRepository,
    O: OtpRepository,
    T: TokenRepository,
{
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<VerifyOtpOutput, AdminServiceError> {
        let mut v = Validator::new();
        let code = v.required("otp", input.otp.as_deref());
        v.conclude()?;
        let code = code.unwrap_or_default();

        let email = input.email.ok_or(AdminServiceError::SessionExpired)?;

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
            .ok_or(AdminServiceError::SessionExpired)?;

        // A concurrent verification or a newer login may have taken the row since `find`.
        if !self.otps.consume(&email, &code).await? {
            return Err(AdminServiceError::InvalidOtp);
        }

        let token = issue_token(&self.tokens, account.id).await?;
        tracing::info!(account_id = %account.id, "admin logged in");
        Ok(VerifyOtpOutput { token, account })
    }
}
