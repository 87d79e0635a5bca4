//! Cross-cutting plumbing shared by corporate services: configuration loading, the common
//! error type, health probes, request-id middleware and tracing setup.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod tracing;
