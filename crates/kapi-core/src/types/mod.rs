//! Host-contract types for Kapi

mod auth;
mod descriptor;
mod provider;

pub use auth::*;
pub use descriptor::*;
pub use provider::*;
