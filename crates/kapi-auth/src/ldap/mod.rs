//! LDAP authentication module
//!
//! Provides:
//! - Simple bind as the user (credential check)
//! - User attribute retrieval
//! - Group membership search and role mapping
//! - An in-memory directory for tests and offline use

mod client;
mod memory;
mod provider;
mod types;

pub use client::LdapClient;
pub use memory::MemoryDirectory;
pub use provider::LdapAuthProvider;
pub use types::*;
