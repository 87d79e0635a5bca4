//! Auth types shared by the admin service handlers.
//!
//! Provides the signed pending-login cookie, the `BearerToken` extractor and opaque
//! session-token generation/hashing.

pub mod bearer;
pub mod cookie;
pub mod token;
