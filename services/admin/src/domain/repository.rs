#![allow(async_fn_in_trait)]

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use corporate_domain::id::ContentId;
use corporate_domain::pagination::PageRequest;

use crate::domain::content::ContentKind;
use crate::domain::types::{Account, OneTimePasscode, SessionToken, Upload};
use crate::error::AdminServiceError;

/// Fields of a new admin account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
}

/// Changes applied by a profile update or a password reset.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub password_hash: Option<String>,
}

pub trait AccountRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AdminServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AdminServiceError>;

    /// Returns `false` when the email is already taken.
    async fn create(&self, account: &NewAccount) -> Result<bool, AdminServiceError>;

    async fn update(
        &self,
        id: Uuid,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, AdminServiceError>;
}

/// Store of one-time passcodes, at most one per email.
pub trait OtpRepository: Send + Sync {
    /// Insert or replace the passcode for `otp.email` (last writer wins).
    async fn upsert(&self, otp: &OneTimePasscode) -> Result<(), AdminServiceError>;

    /// Find the record matching both email and code.
    async fn find(
        &self,
        email: &str,
        code: &str,
    ) -> Result<Option<OneTimePasscode>, AdminServiceError>;

    /// Delete the record only if it still holds `code`. Returns `true` if a row was deleted.
    async fn consume(&self, email: &str, code: &str) -> Result<bool, AdminServiceError>;
}

pub trait TokenRepository: Send + Sync {
    async fn create(&self, token: &SessionToken) -> Result<(), AdminServiceError>;

    /// Resolve a token digest to its account, touching `last_used_at`.
    async fn find_account(&self, token_hash: &[u8]) -> Result<Option<Account>, AdminServiceError>;

    /// Delete every token of the account. Returns the number revoked.
    async fn revoke_all(&self, account_id: Uuid) -> Result<u64, AdminServiceError>;
}

/// Persistence for one content resource.
pub trait ContentRepository<R: ContentKind>: Send + Sync {
    /// Newest first.
    fn list(&self, page: PageRequest)
    -> impl Future<Output = Result<Vec<R>, AdminServiceError>> + Send;

    fn find(&self, id: ContentId)
    -> impl Future<Output = Result<Option<R>, AdminServiceError>> + Send;

    fn create(
        &self,
        draft: &R::Draft,
        photo: Option<&str>,
    ) -> impl Future<Output = Result<R, AdminServiceError>> + Send;

    /// `photo` replaces the stored filename when given. `None` if the row does not exist.
    fn update(
        &self,
        id: ContentId,
        patch: &R::Patch,
        photo: Option<&str>,
    ) -> impl Future<Output = Result<Option<R>, AdminServiceError>> + Send;

    /// Returns `false` if the row does not exist.
    fn delete(&self, id: ContentId) -> impl Future<Output = Result<bool, AdminServiceError>> + Send;
}

pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, AdminServiceError>;

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, AdminServiceError>;
}

/// Outgoing mail.
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AdminServiceError>;
}

/// Storage for uploaded images served under `/images`.
pub trait FileStore: Send + Sync {
    /// Store under `name`.
    async fn put(&self, name: &str, upload: &Upload) -> Result<(), AdminServiceError>;

    /// Remove a stored file; a missing file is not an error.
    async fn remove(&self, name: &str) -> Result<(), AdminServiceError>;
}
