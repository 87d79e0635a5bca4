use crate::context::AuthContext;

/// Screens reachable without a session.
pub const PUBLIC_PATHS: [&str; 4] = ["/login", "/verify-otp", "/register", "/forgot-password"];

/// Outcome of the admin panel route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    RedirectToLogin,
}

/// Decide whether `path` may be shown. Every screen except [`PUBLIC_PATHS`] needs a session.
pub fn guard(ctx: &AuthContext, path: &str) -> Access {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    if PUBLIC_PATHS.contains(&path) || ctx.is_authenticated() {
        Access::Allow
    } else {
        Access::RedirectToLogin
    }
}
