use chrono::Utc;
use uuid::Uuid;

use corporate_auth_types::token::{generate_token, hash_token};

use crate::domain::repository::TokenRepository;
use crate::domain::types::{Account, SessionToken, TOKEN_NAME};
use crate::error::AdminServiceError;

/// Create a session token for the account and return its plaintext value.
pub async fn issue_token<T: TokenRepository>(
    tokens: &T,
    account_id: Uuid,
) -> Result<String, AdminServiceError> {
    let plaintext = generate_token();
    let record = SessionToken {
        id: Uuid::now_v7(),
        account_id,
        name: TOKEN_NAME.to_owned(),
        token_hash: hash_token(&plaintext),
        created_at: Utc::now(),
        last_used_at: None,
    };
    tokens.create(&record).await?;
    Ok(plaintext)
}

// ── Authenticate ──────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<T: TokenRepository> {
    pub tokens: T,
}

impl<T: TokenRepository> AuthenticateUseCase<T> {
    /// Resolve a bearer token to its account. Unknown or revoked tokens are `Unauthenticated`.
    pub async fn execute(&self, bearer: &str) -> Result<Account, AdminServiceError> {
        self.tokens
            .find_account(&hash_token(bearer))
            .await?
            .ok_or(AdminServiceError::Unauthenticated)
    }
}

// ── Logout ────────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<T: TokenRepository> {
    pub tokens: T,
}

impl<T: TokenRepository> LogoutUseCase<T> {
    /// Revoke every token of the account, on all devices.
    pub async fn execute(&self, account: &Account) -> Result<(), AdminServiceError> {
        let revoked = self.tokens.revoke_all(account.id).await?;
        tracing::info!(account_id = %account.id, revoked, "admin logged out");
        Ok(())
    }
}
