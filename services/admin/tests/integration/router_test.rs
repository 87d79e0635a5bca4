use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum_extra::extract::cookie::Key;
use axum_test::TestServer;
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use serde_json::{Value, json};
use uuid::Uuid;

use corporate_admin::domain::repository::PasswordHasher;
use corporate_admin_schema::{access_tokens, admins, one_time_passcodes};

use corporate_admin::domain::types::PublicUrls;
use corporate_admin::infra::mail::SmtpMailer;
use corporate_admin::infra::password::Argon2Hasher;
use corporate_admin::infra::storage::DiskFileStore;
use corporate_admin::router::{build_router, cors_layer};
use corporate_admin::state::AppState;

/// Router over a disconnected database; only paths that fail before any query are exercised.
fn server() -> TestServer {
    server_with(DatabaseConnection::default())
}

fn server_with(db: DatabaseConnection) -> TestServer {
    let state = AppState {
        db,
        cookie_key: Key::generate(),
        cookie_secure: false,
        urls: PublicUrls::new("http://localhost:8000"),
        hasher: Argon2Hasher::default(),
        mailer: SmtpMailer { settings: None },
        files: DiskFileStore {
            root: std::env::temp_dir().join(format!("corporate-admin-{}", Uuid::new_v4())),
        },
    };
    let cors = cors_layer("http://localhost:5173");
    TestServer::new(build_router(state, cors)).unwrap()
}

#[tokio::test]
async fn should_answer_health_probes() {
    let server = server();

    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_render_unknown_route_as_json_not_found() {
    let response = server().get("/api/nothing-here").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["status"], "failed");
    assert_eq!(body["kind"], "NOT_FOUND");
}

#[tokio::test]
async fn should_render_wrong_method_as_json() {
    let response = server().get("/api/login").await;

    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "METHOD_NOT_ALLOWED");
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let response = server().get("/healthz").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_require_bearer_token_for_me() {
    let response = server().get("/api/admin/me").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn should_reject_malformed_authorization_header() {
    let response = server()
        .post("/api/admin/logout")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_require_bearer_token_for_content_writes() {
    let server = server();

    server
        .post("/api/events")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/api/members/1")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .delete("/api/announcements/1")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_validate_login_body_before_lookup() {
    let response = server()
        .post("/api/login")
        .json(&json!({ "email": "", "password": "" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["errors"]["email"][0], "The email field is required.");
    assert_eq!(body["errors"]["password"][0], "The password field is required.");
}

#[tokio::test]
async fn should_report_expired_session_without_pending_login_cookie() {
    let response = server()
        .post("/api/login/verify-otp")
        .json(&json!({ "otp": 123456 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "SESSION_EXPIRED");
    assert_eq!(body["message"], "OTP session expired");
}

#[tokio::test]
async fn should_ignore_unsigned_pending_login_cookie() {
    let response = server()
        .post("/api/login/verify-otp")
        .add_header(header::COOKIE, HeaderValue::from_static("otp_login_email=admin@corp.test"))
        .json(&json!({ "otp": "123456" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "SESSION_EXPIRED");
}

#[tokio::test]
async fn should_require_otp_field() {
    let response = server()
        .post("/api/login/verify-otp")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["errors"]["otp"][0], "The otp field is required.");
}

#[tokio::test]
async fn should_allow_admin_panel_origin_with_credentials() {
    let response = server()
        .get("/healthz")
        .add_header(
            HeaderName::from_static("origin"),
            HeaderValue::from_static("http://localhost:5173"),
        )
        .await;

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn should_answer_malformed_content_id_as_json_not_found() {
    let response = server().get("/api/events/abc").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["status"], "failed");
    assert_eq!(body["kind"], "NOT_FOUND");
    assert_eq!(body["message"], "Event not found");
}

#[tokio::test]
async fn should_answer_malformed_paging_as_json_validation_error() {
    let response = server().get("/api/members?page=abc").await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert!(body["errors"]["query"][0].is_string());
}

#[tokio::test]
async fn should_set_and_clear_pending_login_cookie() {
    let now = Utc::now();
    let admin = admins::Model {
        id: Uuid::now_v7(),
        name: "Admin".to_owned(),
        email: "admin@corp.test".to_owned(),
        password_hash: Argon2Hasher::default().hash("secret123").await.unwrap(),
        avatar: "default.png".to_owned(),
        created_at: now,
        updated_at: now,
    };
    let otp = one_time_passcodes::Model {
        email: admin.email.clone(),
        code: "123456".to_owned(),
        created_at: now,
    };
    let token = access_tokens::Model {
        id: Uuid::now_v7(),
        admin_id: admin.id,
        name: "admin-panel".to_owned(),
        token_hash: vec![0; 32],
        last_used_at: None,
        created_at: now,
    };
    let done = || MockExecResult {
        last_insert_id: 0,
        rows_affected: 1,
    };
    // login: find admin, upsert otp; verify: find otp, find admin, consume otp, insert token
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin.clone()]])
        .append_query_results([vec![otp]])
        .append_query_results([vec![admin]])
        .append_query_results([vec![token]])
        .append_exec_results([done(), done()])
        .into_connection();
    let server = server_with(db);

    let login = server
        .post("/api/login")
        .json(&json!({ "email": "admin@corp.test", "password": "secret123" }))
        .await;
    login.assert_status_ok();
    let issued = login
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets the pending-login cookie")
        .to_str()
        .unwrap()
        .to_owned();
    assert!(issued.starts_with("otp_login_email="), "{issued}");
    assert!(issued.contains("HttpOnly"), "{issued}");
    assert!(issued.contains("SameSite=Lax"), "{issued}");
    assert!(issued.contains("Max-Age=300"), "{issued}");

    let pair = issued.split(';').next().unwrap().to_owned();
    let verify = server
        .post("/api/login/verify-otp")
        .add_header(header::COOKIE, HeaderValue::from_str(&pair).unwrap())
        .json(&json!({ "otp": "123456" }))
        .await;
    verify.assert_status_ok();
    let body: Value = verify.json();
    assert_eq!(body["status"], "success");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["admin"]["email"], "admin@corp.test");

    let cleared = verify
        .headers()
        .get(header::SET_COOKIE)
        .expect("verification clears the pending-login cookie")
        .to_str()
        .unwrap()
        .to_owned();
    assert!(cleared.starts_with("otp_login_email="), "{cleared}");
    assert!(cleared.contains("Max-Age=0"), "{cleared}");
}

#[tokio::test]
async fn should_route_password_reset_endpoints() {
    let server = server();

    let forgot = server
        .post("/api/forgot-password")
        .json(&json!({ "email": "nope" }))
        .await;
    forgot.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = forgot.json();
    assert_eq!(body["errors"]["email"][0], "The email field must be a valid email address.");

    let reset = server
        .post("/api/reset-password")
        .json(&json!({ "email": "admin@corp.test", "otp": 123456, "password": "short" }))
        .await;
    reset.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = reset.json();
    assert!(body["errors"].get("otp").is_none());
    assert_eq!(body["errors"]["password"][0], "The password field must be at least 8 characters.");
}
