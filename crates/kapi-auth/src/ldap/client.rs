//! LDAP Client implementation
//!
//! Verifies credentials with a simple bind as the user, then reads the
//! user's attributes and group memberships over the same connection.
//! Supports LDAP, LDAPS (SSL), and STARTTLS connections.

use crate::directory::{Directory, DirectoryUser};
use crate::ldap::types::LdapConfig;
use async_trait::async_trait;
use kapi_core::{Error, Result};
use ldap3::{Ldap, LdapConnAsync, LdapConnSettings, Scope, SearchEntry};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// LDAP directory client
pub struct LdapClient {
    config: LdapConfig,
}

impl LdapClient {
    /// Create a new LDAP client
    pub fn new(config: LdapConfig) -> Result<Self> {
        config.validate().map_err(Error::Config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LdapConfig {
        &self.config
    }

    /// Create LDAP connection with proper TLS settings
    async fn create_connection(&self, server_url: &str) -> Result<(LdapConnAsync, Ldap)> {
        let settings = LdapConnSettings::new()
            .set_conn_timeout(Duration::from_secs(self.config.timeout_seconds))
            .set_starttls(self.config.start_tls);

        debug!("Connecting to LDAP server: {}", server_url);

        LdapConnAsync::with_settings(settings, server_url)
            .await
            .map_err(|e| Error::Bind(e.to_string()))
    }

    async fn read_user(&self, ldap: &mut Ldap, user_dn: &str) -> Result<DirectoryUser> {
        let attributes = self.read_attributes(ldap, user_dn).await?;
        let groups = self.read_groups(ldap, user_dn).await?;

        Ok(DirectoryUser {
            dn: user_dn.to_string(),
            attributes,
            groups,
        })
    }

    async fn read_attributes(
        &self,
        ldap: &mut Ldap,
        user_dn: &str,
    ) -> Result<BTreeMap<String, String>> {
        // An empty attribute list would ask the server for everything
        if self.config.user_attributes.is_empty() {
            return Ok(BTreeMap::new());
        }

        let attrs: Vec<&str> = self
            .config
            .user_attributes
            .iter()
            .map(String::as_str)
            .collect();

        let (rs, _res) = ldap
            .search(user_dn, Scope::Base, "(objectClass=*)", attrs)
            .await
            .map_err(|e| Error::Directory(e.to_string()))?
            .success()
            .map_err(|e| Error::Directory(e.to_string()))?;

        let mut values = BTreeMap::new();
        if let Some(result) = rs.into_iter().next() {
            let entry = SearchEntry::construct(result);
            for name in &self.config.user_attributes {
                if let Some(value) = get_first_attr(&entry, name) {
                    values.insert(name.clone(), value);
                }
            }
        }

        debug!("Read {} attributes for {}", values.len(), user_dn);
        Ok(values)
    }

    async fn read_groups(&self, ldap: &mut Ldap, user_dn: &str) -> Result<Vec<String>> {
        let filter = self.config.build_group_filter(user_dn);

        debug!("Searching groups with filter: {}", filter);

        let (rs, _res) = ldap
            .search(
                &self.config.base_dn,
                Scope::Subtree,
                &filter,
                vec![self.config.group_name_attribute.as_str()],
            )
            .await
            .map_err(|e| Error::Directory(e.to_string()))?
            .success()
            .map_err(|e| Error::Directory(e.to_string()))?;

        let groups: Vec<String> = rs
            .into_iter()
            .map(SearchEntry::construct)
            .filter_map(|entry| get_first_attr(&entry, &self.config.group_name_attribute))
            .collect();

        debug!("Found {} groups for user", groups.len());
        Ok(groups)
    }
}

#[async_trait]
impl Directory for LdapClient {
    async fn fetch_user(
        &self,
        server_url: &str,
        username: &str,
        password: &str,
    ) -> Result<DirectoryUser> {
        let user_dn = self.config.build_user_dn(username);
        let (conn, mut ldap) = self.create_connection(server_url).await?;

        ldap3::drive!(conn);

        // Unknown user and wrong password both fail here
        ldap.simple_bind(&user_dn, password)
            .await
            .and_then(|res| res.success())
            .map_err(|e| Error::Bind(e.to_string()))?;

        debug!("Bound as {}", user_dn);

        let user = self.read_user(&mut ldap, &user_dn).await;
        let _ = ldap.unbind().await;
        user
    }
}

/// Helper to get first attribute value from LDAP entry.
/// Attribute names are case-insensitive.
fn get_first_attr(entry: &SearchEntry, attr: &str) -> Option<String> {
    entry
        .attrs
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(attr))
        .and_then(|(_, values)| values.first().cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_ldap_client_creation() {
        let client = LdapClient::new(LdapConfig::default()).unwrap();
        assert_eq!(client.config().base_dn, "dc=example,dc=com");

        let invalid = LdapConfig {
            base_dn: String::new(),
            ..Default::default()
        };
        assert!(matches!(LdapClient::new(invalid), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_bind_error() {
        let client = LdapClient::new(LdapConfig::default()).unwrap();
        let err = client
            .fetch_user("http://ldap.forumsys.com", "einstein", "password")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Bind(_)));
        assert!(err.to_string().starts_with("Unable to authenticate with LDAP server: "));
    }

    #[test]
    fn test_first_attr_is_case_insensitive() {
        let entry = SearchEntry {
            dn: "uid=tesla,dc=example,dc=com".to_string(),
            attrs: HashMap::from([(
                "telephonenumber".to_string(),
                vec!["555-1234".to_string(), "555-9999".to_string()],
            )]),
            bin_attrs: HashMap::new(),
        };

        assert_eq!(
            get_first_attr(&entry, "telephoneNumber").as_deref(),
            Some("555-1234")
        );
        assert_eq!(get_first_attr(&entry, "mail"), None);
    }

    /// Needs network access to the public test directory.
    /// Run with `cargo test -p kapi-auth -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_forumsys_directory_lookup() {
        let client = LdapClient::new(LdapConfig::default()).unwrap();
        let user = client
            .fetch_user("ldap://ldap.forumsys.com", "einstein", "password")
            .await
            .unwrap();

        assert_eq!(user.dn, "uid=einstein,dc=example,dc=com");
        assert!(user.groups.iter().any(|g| g == "scientists"));
        assert!(user.attributes.contains_key("mail"));

        let err = client
            .fetch_user("ldap://ldap.forumsys.com", "einstein", "apple")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Bind(_)));
    }
}
