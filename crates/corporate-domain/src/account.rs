//! Account projections exposed over the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::AccountId;

/// Minimal projection returned after OTP verification (`admin` field).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub name: String,
    pub email: String,
}

/// Full public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AccountProfile> for AccountSummary {
    fn from(profile: &AccountProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name.clone(),
            email: profile.email.clone(),
        }
    }
}
