//! In-memory directory
//!
//! Behaves like a bind-then-search LDAP directory without a server. Used by
//! the test suites and by `kapi --directory memory` for offline demos.

use crate::directory::{Directory, DirectoryUser};
use async_trait::async_trait;
use kapi_core::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

const BASE_DN: &str = "dc=example,dc=com";

struct MemoryEntry {
    password: String,
    attributes: BTreeMap<String, String>,
}

/// Directory held in memory
#[derive(Default)]
pub struct MemoryDirectory {
    users: HashMap<String, MemoryEntry>,
    groups: Vec<(String, Vec<String>)>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user entry
    pub fn with_user(
        mut self,
        username: &str,
        password: &str,
        attributes: &[(&str, &str)],
    ) -> Self {
        self.users.insert(
            username.to_string(),
            MemoryEntry {
                password: password.to_string(),
                attributes: attributes
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            },
        );
        self
    }

    /// Add a group listing the given usernames as members
    pub fn with_group(mut self, name: &str, members: &[&str]) -> Self {
        self.groups.push((
            name.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        ));
        self
    }

    /// The users and groups of the public test directory at
    /// `ldap.forumsys.com`. Every password is `password`.
    pub fn forumsys() -> Self {
        let mut directory = Self::new();

        for name in [
            "boyle", "curie", "einstein", "euclid", "euler", "galieleo", "gauss", "newton",
            "nobel", "pasteur", "riemann", "tesla",
        ] {
            let mail = format!("{}@ldap.forumsys.com", name);
            directory = directory.with_user(name, "password", &[("mail", mail.as_str())]);
        }

        // einstein also carries a phone number
        directory
            .with_user(
                "einstein",
                "password",
                &[
                    ("mail", "einstein@ldap.forumsys.com"),
                    ("telephoneNumber", "314-159-2653"),
                ],
            )
            .with_group("mathematicians", &["euclid", "euler", "gauss", "riemann"])
            .with_group("scientists", &["einstein", "galieleo", "newton", "tesla"])
            .with_group("chemists", &["boyle", "curie", "nobel", "pasteur"])
            .with_group("italians", &["tesla"])
    }

    fn user_dn(username: &str) -> String {
        format!("uid={},{}", username, BASE_DN)
    }
}

#[async_trait]
impl Directory for MemoryDirectory {
    async fn fetch_user(
        &self,
        server_url: &str,
        username: &str,
        password: &str,
    ) -> Result<DirectoryUser> {
        debug!("Binding against in-memory directory (configured server: {})", server_url);

        let entry = match self.users.get(username) {
            Some(entry) if entry.password == password => entry,
            _ => return Err(Error::Bind("Invalid Credentials".to_string())),
        };

        let groups = self
            .groups
            .iter()
            .filter(|(_, members)| members.iter().any(|m| m == username))
            .map(|(name, _)| name.clone())
            .collect();

        Ok(DirectoryUser {
            dn: Self::user_dn(username),
            attributes: entry.attributes.clone(),
            groups,
        })
    }
}
