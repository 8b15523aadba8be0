//! # API Shared
//!
//! Shared utilities and definitions for the PTB HTTP API.
//!
//! Contains:
//! - Request/response types (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//! - Authentication utilities (API key plus clinician identity)

pub mod auth;
pub mod dto;
pub mod health;

pub use health::HealthService;
