use axum_extra::extract::cookie::Key;
use sea_orm::Database;
use tracing::{info, warn};

use corporate_admin::config::AdminConfig;
use corporate_admin::domain::types::PublicUrls;
use corporate_admin::infra::mail::SmtpMailer;
use corporate_admin::infra::password::Argon2Hasher;
use corporate_admin::infra::storage::DiskFileStore;
use corporate_admin::router::{build_router, cors_layer};
use corporate_admin::state::AppState;
use corporate_core::config::Config;
use corporate_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let config = AdminConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let cookie_key = match config.cookie_secret.as_deref().map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => panic!("COOKIE_SECRET must be at least 64 bytes"),
        None => {
            warn!("COOKIE_SECRET not set; pending logins will not survive a restart");
            Key::generate()
        }
    };

    let mailer = SmtpMailer {
        settings: config.smtp_settings(),
    };
    if mailer.settings.is_none() {
        warn!("SMTP_HOST not set; login OTP mails will be logged and dropped");
    }

    let cors = match config.frontend_origin.as_deref() {
        Some(origin) => Some(cors_layer(origin).expect("invalid FRONTEND_ORIGIN")),
        None => None,
    };

    let state = AppState {
        db,
        cookie_key,
        cookie_secure: config.cookie_secure,
        urls: PublicUrls::new(config.public_url.clone()),
        hasher: Argon2Hasher::new(
            config
                .password_hashing_secret
                .clone()
                .map(String::into_bytes),
        ),
        mailer,
        files: DiskFileStore {
            root: config.storage_dir.clone().into(),
        },
    };

    let router = build_router(state, cors);
    let addr = format!("0.0.0.0:{}", config.admin_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("admin service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
