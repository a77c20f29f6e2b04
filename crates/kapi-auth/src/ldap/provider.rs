//! LDAP authentication provider
//!
//! Binds as the user, reads their attributes and groups, and maps groups to
//! roles. A user without any qualifying group is denied.

use crate::directory::Directory;
use crate::ldap::client::LdapClient;
use crate::ldap::types::LdapConfig;
use crate::provider::AuthProvider;
use crate::roles::map_groups_to_roles;
use async_trait::async_trait;
use kapi_core::types::{
    AuthOutcome, AuthResponse, ConfigInfo, ConfigurePayload, LastLogin, LoginInfo, LoginPayload,
    ProviderConfig,
};
use kapi_core::config::ProviderSection;
use kapi_core::{Error, KapiConfig, Result};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info, warn};

/// LDAP authentication provider for the host
pub struct LdapAuthProvider<D = LdapClient> {
    directory: Arc<D>,
    config: RwLock<ProviderConfig>,
    user_info: serde_json::Map<String, serde_json::Value>,
}

impl LdapAuthProvider<LdapClient> {
    /// Build a provider talking to a real directory, configured from file/env
    pub fn from_config(config: &KapiConfig) -> Result<Self> {
        let client = LdapClient::new(LdapConfig::from(config.ldap.clone()))?;
        Ok(Self::with_directory(client, config))
    }
}

impl<D: Directory> LdapAuthProvider<D> {
    /// Create a provider with default configuration
    pub fn new(directory: D) -> Self {
        Self {
            directory: Arc::new(directory),
            config: RwLock::new(ProviderConfig::default()),
            user_info: ProviderSection::default().user_info,
        }
    }

    /// Create a provider over any directory, applying the `[provider]` section
    pub fn with_directory(directory: D, config: &KapiConfig) -> Self {
        let provider = Self::new(directory).with_user_info(config.provider.user_info.clone());
        provider.store_config(&config.provider.configure_payload());
        provider
    }

    /// Static object returned as `userInfo` on every successful login
    pub fn with_user_info(
        mut self,
        user_info: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.user_info = user_info;
        self
    }

    pub fn current_config(&self) -> ProviderConfig {
        self.config.read().clone()
    }

    fn store_config(&self, payload: &ConfigurePayload) {
        let config = ProviderConfig::from_payload(payload);
        info!(
            "Provider configured: server={}, key lifetime={} minutes",
            config.server_name, config.key_lifetime_minutes
        );
        *self.config.write() = config;
    }

    async fn try_authenticate(&self, payload: &LoginPayload) -> Result<AuthResponse> {
        if payload.username.is_empty() || payload.password.is_empty() {
            return Err(Error::InvalidRequest(
                "Username and password are required".to_string(),
            ));
        }

        // One snapshot per call, configure() may run concurrently
        let config = self.current_config();

        let user = self
            .directory
            .fetch_user(&config.server_name, &payload.username, &payload.password)
            .await?;

        let role_names = map_groups_to_roles(&payload.username, &user.groups);
        if role_names.is_empty() {
            return Err(Error::AccessDenied {
                username: payload.username.clone(),
            });
        }

        Ok(AuthResponse {
            role_names,
            user_identifier: payload.username.clone(),
            key_lifetime_seconds: config.key_lifetime_seconds(),
            user_data: user.attributes,
            user_info: self.user_info.clone(),
            last_login: LastLogin::default(),
        })
    }
}

#[async_trait]
impl<D: Directory + 'static> AuthProvider for LdapAuthProvider<D> {
    fn configure(&self, payload: &ConfigurePayload) {
        self.store_config(payload);
    }

    async fn authenticate(&self, payload: &LoginPayload) -> AuthOutcome {
        info!("Authenticating with LDAP: {}", payload.username);

        let result = self.try_authenticate(payload).await;
        match &result {
            Ok(response) => info!(
                "User {} authenticated with roles {:?}",
                payload.username, response.role_names
            ),
            Err(e) if e.is_credential_failure() => warn!(
                code = e.code(),
                "Authentication failed for {}: {}",
                payload.username,
                e
            ),
            Err(e) => error!(
                code = e.code(),
                "Directory error for {}: {}",
                payload.username,
                e
            ),
        }

        result.into()
    }

    fn login_info(&self) -> LoginInfo {
        LoginInfo::username_password()
    }

    fn config_info(&self) -> ConfigInfo {
        ConfigInfo::for_config(self.current_config())
    }
}
