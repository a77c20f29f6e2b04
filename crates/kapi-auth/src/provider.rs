//! Host-facing authentication provider contract

use async_trait::async_trait;
use kapi_core::types::{AuthOutcome, ConfigInfo, ConfigurePayload, LoginInfo, LoginPayload};

/// The four entry points a host calls on an authentication provider.
///
/// `authenticate` never fails at the type level: every failure is reported
/// to the host as an error response carrying a message.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Replace the stored configuration. Absent fields take their defaults.
    fn configure(&self, payload: &ConfigurePayload);

    /// Validate credentials and describe the user's roles.
    async fn authenticate(&self, payload: &LoginPayload) -> AuthOutcome;

    /// Fields of the login dialog.
    fn login_info(&self) -> LoginInfo;

    /// Current configuration and the fields an admin may edit.
    fn config_info(&self) -> ConfigInfo;
}
