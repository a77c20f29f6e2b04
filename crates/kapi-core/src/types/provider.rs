//! Provider configuration as exchanged with the host

use serde::{Deserialize, Deserializer, Serialize};

use crate::{DEFAULT_KEY_LIFETIME_MINUTES, DEFAULT_SERVER_NAME};

/// Payload of a `configure` call. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,

    #[serde(
        default,
        deserialize_with = "deserialize_minutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_lifetime_minutes: Option<u64>,
}

/// Accept any JSON number. Non-positive values read as absent, fractions are
/// truncated to whole minutes.
fn deserialize_minutes<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<serde_json::Number>::deserialize(deserializer)?;

    Ok(number.and_then(|n| match n.as_u64() {
        Some(m) => Some(m),
        None => n
            .as_f64()
            .filter(|m| m.is_finite() && *m >= 1.0)
            .map(|m| m.trunc() as u64),
    }))
}

impl ConfigurePayload {
    pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    pub fn with_key_lifetime_minutes(mut self, minutes: u64) -> Self {
        self.key_lifetime_minutes = Some(minutes);
        self
    }
}

/// Configuration currently in effect for the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Directory server URL (ldap:// or ldaps://)
    pub server_name: String,

    /// Lifetime of the API key the host issues after a successful login
    pub key_lifetime_minutes: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            key_lifetime_minutes: DEFAULT_KEY_LIFETIME_MINUTES,
        }
    }
}

impl ProviderConfig {
    /// Build the stored configuration from a `configure` payload.
    ///
    /// Absent fields, an empty server name and a zero lifetime all fall back
    /// to the defaults. Nothing is carried over from an earlier call.
    pub fn from_payload(payload: &ConfigurePayload) -> Self {
        let defaults = Self::default();

        Self {
            server_name: payload
                .server_name
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or(defaults.server_name),
            key_lifetime_minutes: payload
                .key_lifetime_minutes
                .filter(|m| *m > 0)
                .unwrap_or(defaults.key_lifetime_minutes),
        }
    }

    pub fn key_lifetime_seconds(&self) -> u64 {
        self.key_lifetime_minutes.saturating_mul(60)
    }
}
