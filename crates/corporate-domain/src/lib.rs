//! Domain and wire types shared by the admin service and its client.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers and in the client; never in `infra/`.

pub mod account;
pub mod auth;
pub mod content;
pub mod id;
pub mod pagination;
