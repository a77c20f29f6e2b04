//! Configuration for Kapi
//!
//! Loaded from a TOML file or from `KAPI_*` environment variables:
//!
//! ```toml
//! [server]
//! bind_address = "127.0.0.1"
//! port = 8085
//!
//! [provider]
//! server_name = "ldap://ldap.forumsys.com"
//! key_lifetime_minutes = 60
//!
//! [provider.user_info]
//! typeOfPerson = "Cool"
//!
//! [ldap]
//! base_dn = "dc=example,dc=com"
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ConfigurePayload;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KapiConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub provider: ProviderSection,

    #[serde(default)]
    pub ldap: LdapConfigSection,
}

impl KapiConfig {
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("Failed to read config: {}", e)))?;

        debug!("Loaded configuration file: {}", path);
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("KAPI_BIND_ADDRESS") {
            config.server.bind_address = addr;
        }
        if let Ok(port) = std::env::var("KAPI_PORT") {
            if let Ok(p) = port.parse() {
                config.server.port = p;
            }
        }
        if let Ok(level) = std::env::var("KAPI_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("KAPI_LOG_FORMAT") {
            config.logging.format = format;
        }

        if let Ok(server) = std::env::var("KAPI_SERVER_NAME") {
            config.provider.server_name = Some(server);
        }
        if let Ok(minutes) = std::env::var("KAPI_KEY_LIFETIME_MINUTES") {
            if let Ok(m) = minutes.parse() {
                config.provider.key_lifetime_minutes = Some(m);
            }
        }

        // Directory schema from environment
        if let Ok(base_dn) = std::env::var("KAPI_LDAP_BASE_DN") {
            config.ldap.base_dn = base_dn;
        }
        if std::env::var("KAPI_LDAP_START_TLS").map(|v| v == "true").unwrap_or(false) {
            config.ldap.start_tls = true;
        }

        config
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8085,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Initial provider settings, applied as if the host had called `configure`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSection {
    #[serde(default)]
    pub server_name: Option<String>,

    #[serde(default)]
    pub key_lifetime_minutes: Option<u64>,

    /// Static object returned as `userInfo` on every successful login
    #[serde(default = "default_user_info")]
    pub user_info: serde_json::Map<String, serde_json::Value>,
}

fn default_user_info() -> serde_json::Map<String, serde_json::Value> {
    let mut info = serde_json::Map::new();
    info.insert("typeOfPerson".to_string(), "Cool".into());
    info
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            server_name: None,
            key_lifetime_minutes: None,
            user_info: default_user_info(),
        }
    }
}

impl ProviderSection {
    pub fn configure_payload(&self) -> ConfigurePayload {
        ConfigurePayload {
            server_name: self.server_name.clone(),
            key_lifetime_minutes: self.key_lifetime_minutes,
        }
    }
}

/// Directory schema: where users and groups live and what to read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LdapConfigSection {
    /// Base DN for user DNs and group searches
    #[serde(default = "default_base_dn")]
    pub base_dn: String,

    /// User DN template (use {username} and {base_dn} placeholders)
    #[serde(default = "default_user_dn_template")]
    pub user_dn_template: String,

    /// Group search filter (use {dn} placeholder for the user DN)
    #[serde(default = "default_group_filter")]
    pub group_filter: String,

    /// Attribute holding the group name
    #[serde(default = "default_group_name_attr")]
    pub group_name_attribute: String,

    /// User attributes copied into `userData`
    #[serde(default = "default_user_attributes")]
    pub user_attributes: Vec<String>,

    /// Use STARTTLS
    #[serde(default)]
    pub start_tls: bool,

    /// Connection timeout in seconds
    #[serde(default = "default_ldap_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_dn() -> String {
    "dc=example,dc=com".to_string()
}

fn default_user_dn_template() -> String {
    "uid={username},{base_dn}".to_string()
}

fn default_group_filter() -> String {
    "(&(objectClass=groupOfUniqueNames)(uniqueMember={dn}))".to_string()
}

fn default_group_name_attr() -> String {
    "ou".to_string()
}

fn default_user_attributes() -> Vec<String> {
    vec!["mail".to_string(), "telephoneNumber".to_string()]
}

fn default_ldap_timeout() -> u64 {
    10
}

impl Default for LdapConfigSection {
    fn default() -> Self {
        Self {
            base_dn: default_base_dn(),
            user_dn_template: default_user_dn_template(),
            group_filter: default_group_filter(),
            group_name_attribute: default_group_name_attr(),
            user_attributes: default_user_attributes(),
            start_tls: false,
            timeout_seconds: default_ldap_timeout(),
        }
    }
}
