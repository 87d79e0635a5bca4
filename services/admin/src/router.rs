use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use corporate_core::error::{method_not_allowed, not_found};
use corporate_core::health::{healthz, readyz};
use corporate_core::middleware::{propagate_request_id_layer, request_id_layer};
use corporate_domain::content::{Announcement, Event, Member};

use crate::handlers::{
    auth::{forgot_password, login, logout, me, register, reset_password, verify_otp},
    content,
    profile::update_profile,
};
use crate::state::AppState;

/// Request bodies above this are refused before reaching a handler; upload rules apply below it.
const BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

fn api_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/login", post(login))
        .route("/login/verify-otp", post(verify_otp))
        .route("/register", post(register))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/admin/me", get(me))
        .route("/admin/logout", post(logout))
        // Profile
        .route("/profile/update", post(update_profile))
        // Content
        .merge(content::routes::<Event>())
        .merge(content::routes::<Announcement>())
        .merge(content::routes::<Member>())
}

/// CORS for the admin panel origin. Credentials are allowed so the pending-login cookie travels.
pub fn cors_layer(origin: &str) -> Option<CorsLayer> {
    let origin = HeaderValue::from_str(origin).ok()?;
    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true),
    )
}

pub fn build_router(state: AppState, cors: Option<CorsLayer>) -> Router {
    let images = ServeDir::new(&state.files.root);
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes())
        .nest_service("/images", images)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(propagate_request_id_layer())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state);

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}
