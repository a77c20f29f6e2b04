//! Kapi Core Library
//!
//! Host-contract types, configuration and errors shared by the Kapi
//! authentication provider crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::KapiConfig;
pub use error::{Error, Result};

/// Kapi version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory server used when the host does not configure one
pub const DEFAULT_SERVER_NAME: &str = "ldap://ldap.forumsys.com";

/// API key lifetime used when the host does not configure one
pub const DEFAULT_KEY_LIFETIME_MINUTES: u64 = 60;
