//! Bearer-token authentication gate for axum services.
//!
//! `middleware::auth::bearer` verifies `Authorization: Bearer <jwt>` against a
//! shared HMAC secret and puts the decoded `Claims` into the request
//! extensions; handlers read them back through `api::v1::extractors::AuthUser`.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
