use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use corporate_domain::account::{AccountProfile, AccountSummary};
use corporate_domain::auth::OTP_TTL_SECS;
use corporate_domain::id::AccountId;

/// Avatar assigned when registration carries no upload.
pub const DEFAULT_AVATAR: &str = "avatar-1.jpg";

/// Label stored alongside every issued session token.
pub const TOKEN_NAME: &str = "auth_token";

/// Smallest and largest issuable passcode (always six digits).
pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

/// Admin account as stored, including the password hash.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: AccountId(self.id),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn profile(&self, urls: &PublicUrls) -> AccountProfile {
        AccountProfile {
            id: AccountId(self.id),
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            avatar_url: urls.image_url(&self.avatar),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The single live passcode of an account, keyed by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimePasscode {
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl OneTimePasscode {
    /// Stale once strictly more than five minutes have passed since issuance.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at > Duration::seconds(OTP_TTL_SECS)
    }
}

/// Stored session token. Only the SHA-256 digest of the bearer value is kept.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub token_hash: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Image formats accepted for avatars and content photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Timestamp-based name under which an upload is stored, e.g. `1767510000-4821.png`.
pub fn stored_file_name(kind: ImageKind, now: DateTime<Utc>) -> String {
    let suffix: u16 = rand::rng().random_range(0..10_000);
    format!("{}-{suffix:04}.{}", now.timestamp(), kind.extension())
}

/// A file received in a multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: bytes::Bytes,
}

impl Upload {
    pub fn size_kib(&self) -> usize {
        self.bytes.len().div_ceil(1024)
    }
}

/// Builds absolute URLs for files served under `/images`.
#[derive(Debug, Clone)]
pub struct PublicUrls {
    pub base: String,
}

impl PublicUrls {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_owned();
        Self { base }
    }

    pub fn image_url(&self, file: &str) -> String {
        format!("{}/images/{file}", self.base)
    }
}

/// Lowercase and trim an email so lookups and the passcode key agree.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
