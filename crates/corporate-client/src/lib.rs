//! HTTP client for the corporate admin API.
//!
//! Login is two-step: [`ApiClient::login`] checks the password and returns a [`PendingLogin`]
//! carrying the cookie the server set; [`PendingLogin::verify`] trades the mailed passcode for
//! an [`AuthContext`] that every authenticated call takes explicitly.

pub mod client;
pub mod context;
pub mod error;
pub mod guard;
pub mod resource;
pub mod upload;

pub use client::{
    ApiClient, PendingLogin, ProfileUpdate, RegisterRequest, ResetPasswordRequest, VerifyFailure,
};
pub use context::AuthContext;
pub use error::ClientError;
pub use guard::{Access, guard};
pub use resource::{ContentForm, ResourceClient};
pub use upload::FileUpload;
