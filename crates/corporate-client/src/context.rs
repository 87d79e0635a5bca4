use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use corporate_domain::account::AccountSummary;

use crate::error::ClientError;

/// The signed-in admin as the client knows it. Passed explicitly to every authenticated call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    session: Option<Session>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Session {
    token: String,
    admin: AccountSummary,
}

impl AuthContext {
    pub fn authenticated(token: impl Into<String>, admin: AccountSummary) -> Self {
        Self {
            session: Some(Session {
                token: token.into(),
                admin,
            }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn admin(&self) -> Option<&AccountSummary> {
        self.session.as_ref().map(|s| &s.admin)
    }

    pub(crate) fn set_admin(&mut self, admin: AccountSummary) {
        if let Some(session) = &mut self.session {
            session.admin = admin;
        }
    }

    /// Forget the token and profile.
    pub fn clear(&mut self) {
        self.session = None;
    }

    /// Write the context as JSON, replacing any previous file.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), ClientError> {
        let json = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Read a context saved by [`AuthContext::save`]. A missing file is a signed-out context.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
