mod content_test;
mod login_test;
mod password_reset_test;
mod profile_test;
mod router_test;
mod session_test;
