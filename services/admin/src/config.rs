use serde::Deserialize;

use corporate_core::config::Config;

use crate::infra::mail::SmtpSettings;

/// Admin service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct AdminConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port to listen on (default 8000). Env var: `ADMIN_PORT`.
    #[serde(default = "default_port")]
    pub admin_port: u16,
    /// Base URL that image links are built from.
    #[serde(default = "default_public_url")]
    pub public_url: String,
    /// Directory uploads are written to and served from.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,
    /// Key material (at least 64 bytes) for signing the pending-login cookie.
    /// A random per-process key is used when absent, so pending logins do not survive restarts.
    pub cookie_secret: Option<String>,
    /// Set the `Secure` attribute on cookies (enable behind HTTPS).
    #[serde(default)]
    pub cookie_secure: bool,
    /// Admin panel origin allowed by CORS, e.g. `http://localhost:3000`.
    pub frontend_origin: Option<String>,
    /// Argon2 secret (pepper) mixed into every password hash.
    pub password_hashing_secret: Option<String>,
    /// SMTP relay; OTP mails are only logged when unset.
    pub smtp_host: Option<String>,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    /// Sender address; falls back to `SMTP_USERNAME`.
    pub mail_from: Option<String>,
}

impl Config for AdminConfig {}

fn default_port() -> u16 {
    8000
}

fn default_public_url() -> String {
    "http://localhost:8000".to_owned()
}

fn default_storage_dir() -> String {
    "public/images".to_owned()
}

fn default_smtp_port() -> u16 {
    587
}

impl AdminConfig {
    pub fn smtp_settings(&self) -> Option<SmtpSettings> {
        let host = self.smtp_host.clone().filter(|h| !h.is_empty())?;
        Some(SmtpSettings {
            host,
            port: self.smtp_port,
            username: self.smtp_username.clone(),
            password: self.smtp_password.clone(),
            from: self
                .mail_from
                .clone()
                .unwrap_or_else(|| self.smtp_username.clone()),
        })
    }
}
