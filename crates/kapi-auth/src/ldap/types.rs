//! LDAP directory schema configuration
//!
//! Describes where user entries and groups live and which attributes the
//! provider reads. Defaults fit the public test directory at
//! `ldap.forumsys.com`.

use kapi_core::config::LdapConfigSection;
use serde::{Deserialize, Serialize};

// ============================================================================
// LDAP Configuration
// ============================================================================

/// LDAP schema configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LdapConfig {
    /// Base DN for user DNs and group searches
    /// Example: "dc=example,dc=com"
    pub base_dn: String,

    /// User DN template
    /// Use {username} and {base_dn} as placeholders
    /// Example: "uid={username},{base_dn}"
    pub user_dn_template: String,

    /// Group search filter
    /// Use {dn} as placeholder for the user DN
    /// Example: "(&(objectClass=groupOfUniqueNames)(uniqueMember={dn}))"
    pub group_filter: String,

    /// Attribute holding the group name
    pub group_name_attribute: String,

    /// User attributes copied into `userData`
    pub user_attributes: Vec<String>,

    /// Use STARTTLS for connection upgrade
    pub start_tls: bool,

    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for LdapConfig {
    fn default() -> Self {
        LdapConfigSection::default().into()
    }
}

impl From<LdapConfigSection> for LdapConfig {
    fn from(section: LdapConfigSection) -> Self {
        Self {
            base_dn: section.base_dn,
            user_dn_template: section.user_dn_template,
            group_filter: section.group_filter,
            group_name_attribute: section.group_name_attribute,
            user_attributes: section.user_attributes,
            start_tls: section.start_tls,
            timeout_seconds: section.timeout_seconds,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

impl LdapConfig {
    /// Build the user DN, escaping the username as an RDN value
    pub fn build_user_dn(&self, username: &str) -> String {
        self.user_dn_template
            .replace("{base_dn}", &self.base_dn)
            .replace("{username}", &ldap3::dn_escape(username))
    }

    /// Build the group search filter, escaping the user DN as an assertion value
    pub fn build_group_filter(&self, user_dn: &str) -> String {
        self.group_filter.replace("{dn}", &ldap3::ldap_escape(user_dn))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_dn.is_empty() {
            return Err("Base DN is required".to_string());
        }

        if !self.user_dn_template.contains("{username}") {
            return Err("User DN template must contain {username} placeholder".to_string());
        }

        if !self.group_filter.contains("{dn}") {
            return Err("Group filter must contain {dn} placeholder".to_string());
        }

        if self.group_name_attribute.is_empty() {
            return Err("Group name attribute is required".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("Timeout must be at least one second".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dn_building() {
        let config = LdapConfig::default();
        assert_eq!(config.build_user_dn("einstein"), "uid=einstein,dc=example,dc=com");
    }

    #[test]
    fn test_user_dn_escapes_username() {
        let config = LdapConfig::default();
        let dn = config.build_user_dn("a,cn=admin");

        assert!(dn.starts_with("uid=a\\"));
        assert!(dn.ends_with(",dc=example,dc=com"));
        assert!(!dn.contains("a,cn=admin"));
    }

    #[test]
    fn test_group_filter_building() {
        let config = LdapConfig::default();
        assert_eq!(
            config.build_group_filter("uid=newton,dc=example,dc=com"),
            "(&(objectClass=groupOfUniqueNames)(uniqueMember=uid=newton,dc=example,dc=com))"
        );
        assert!(!config.build_group_filter("uid=*)(uid=x").contains("*)("));
    }

    #[test]
    fn test_config_validation() {
        assert!(LdapConfig::default().validate().is_ok());

        let config = LdapConfig {
            user_dn_template: "uid=fixed,dc=example,dc=com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = LdapConfig {
            group_filter: "(objectClass=groupOfUniqueNames)".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
