//! Directory abstraction used by the authentication provider

use async_trait::async_trait;
use kapi_core::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What one directory round trip yields for an authenticated user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// User DN (Distinguished Name)
    pub dn: String,

    /// First value of each requested attribute the entry carries
    pub attributes: BTreeMap<String, String>,

    /// Names of the groups listing the user as a member, in directory order
    pub groups: Vec<String>,
}

/// A directory that can verify credentials and describe the user.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Bind to `server_url` as `username` with `password`, then read the
    /// user's attributes and group memberships.
    ///
    /// Connection and bind failures are reported as [`kapi_core::Error::Bind`];
    /// failures after a successful bind as [`kapi_core::Error::Directory`].
    async fn fetch_user(
        &self,
        server_url: &str,
        username: &str,
        password: &str,
    ) -> Result<DirectoryUser>;
}
