//! Authentication for Kapi
//!
//! Validates credentials against a directory and maps group memberships to
//! application roles for the host.

pub mod directory;
pub mod ldap;
pub mod provider;
pub mod roles;

pub use directory::{Directory, DirectoryUser};
pub use ldap::{LdapAuthProvider, LdapClient, LdapConfig, MemoryDirectory};
pub use provider::AuthProvider;
pub use roles::{map_groups_to_roles, role_for_group, FULL_ACCESS, READ_ONLY};
