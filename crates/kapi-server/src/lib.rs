//! HTTP host shim for Kapi
//!
//! Exposes the provider entry points (`configure`, `authenticate`,
//! `getLoginInfo`, `getConfigInfo`) as JSON endpoints.

pub mod routes;
pub mod server;

pub use routes::provider_routes;
pub use server::{AppState, ProviderServer};
