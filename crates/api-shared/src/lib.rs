//! # API Shared
//!
//! Shared utilities and definitions for the ASM APIs.
//!
//! Contains:
//! - Wire types (`wire` module) with camelCase field names and OpenAPI schemas
//! - Translation between wire types and `asm-core` domain types
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
