//! Pending-login cookie carrying the email between password check and OTP verification.
//!
//! The cookie is signed with the service key, so a client cannot swap in another account's
//! email; an unsigned or tampered cookie reads as absent.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use time::Duration;

pub use corporate_domain::auth::{OTP_TTL_SECS, PENDING_LOGIN_COOKIE};

/// Set the pending-login cookie (HTTP-only, 5 minutes) on the jar.
///
/// ```
/// use axum_extra::extract::cookie::{Key, SignedCookieJar};
/// use corporate_auth_types::cookie::{set_pending_login_cookie, PENDING_LOGIN_COOKIE};
///
/// let jar = SignedCookieJar::new(Key::generate());
/// let jar = set_pending_login_cookie(jar, "a@x.com".to_string(), false);
/// let cookie = jar.get(PENDING_LOGIN_COOKIE).unwrap();
/// assert_eq!(cookie.value(), "a@x.com");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(300)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_pending_login_cookie(jar: SignedCookieJar, email: String, secure: bool) -> SignedCookieJar {
    let cookie = Cookie::build((PENDING_LOGIN_COOKIE, email))
        .path("/")
        .max_age(Duration::seconds(OTP_TTL_SECS))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Read the email carried by a valid pending-login cookie.
pub fn pending_login_email(jar: &SignedCookieJar) -> Option<String> {
    jar.get(PENDING_LOGIN_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|email| !email.is_empty())
}

/// Clear the pending-login cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::{Key, SignedCookieJar};
/// use corporate_auth_types::cookie::{
///     clear_pending_login_cookie, pending_login_email, set_pending_login_cookie,
///     PENDING_LOGIN_COOKIE,
/// };
///
/// let jar = SignedCookieJar::new(Key::generate());
/// let jar = set_pending_login_cookie(jar, "a@x.com".to_string(), false);
/// let jar = clear_pending_login_cookie(jar, false);
/// let cookie = jar.get(PENDING_LOGIN_COOKIE).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(pending_login_email(&jar), None);
/// ```
pub fn clear_pending_login_cookie(jar: SignedCookieJar, secure: bool) -> SignedCookieJar {
    let cookie = Cookie::build((PENDING_LOGIN_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
