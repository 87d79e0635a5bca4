use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sea_orm::DatabaseConnection;

use crate::domain::types::PublicUrls;
use crate::infra::content::{DbAnnouncementRepository, DbEventRepository, DbMemberRepository};
use crate::infra::db::{DbAccountRepository, DbOtpRepository, DbTokenRepository};
use crate::infra::mail::SmtpMailer;
use crate::infra::password::Argon2Hasher;
use crate::infra::storage::DiskFileStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Signs the pending-login cookie.
    pub cookie_key: Key,
    pub cookie_secure: bool,
    pub urls: PublicUrls,
    pub hasher: Argon2Hasher,
    pub mailer: SmtpMailer,
    pub files: DiskFileStore,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn token_repo(&self) -> DbTokenRepository {
        DbTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn event_repo(&self) -> DbEventRepository {
        DbEventRepository {
            db: self.db.clone(),
        }
    }

    pub fn announcement_repo(&self) -> DbAnnouncementRepository {
        DbAnnouncementRepository {
            db: self.db.clone(),
        }
    }

    pub fn member_repo(&self) -> DbMemberRepository {
        DbMemberRepository {
            db: self.db.clone(),
        }
    }
}
