//! Login request and authentication response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Credentials submitted through the login form
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl LoginPayload {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPayload")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// When and from where the user last logged in, if known
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastLogin {
    pub datetime: Option<DateTime<Utc>>,
    pub ip_address: Option<String>,
}

/// Successful authentication, returned to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Application roles granted to the user
    pub role_names: Vec<String>,

    pub user_identifier: String,

    pub key_lifetime_seconds: u64,

    /// Directory attributes exposed to the application
    pub user_data: BTreeMap<String, String>,

    /// Extra information returned to the caller along with the auth token
    pub user_info: serde_json::Map<String, serde_json::Value>,

    pub last_login: LastLogin,
}

impl AuthResponse {
    pub fn has_role(&self, role: &str) -> bool {
        self.role_names.iter().any(|r| r == role)
    }
}

/// Failed authentication, returned to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error_message: message.into(),
        }
    }
}

/// Result of an `authenticate` call as the host sees it: either shape,
/// never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthOutcome {
    Success(AuthResponse),
    Failure(ErrorResponse),
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success(_))
    }

    pub fn response(&self) -> Option<&AuthResponse> {
        match self {
            AuthOutcome::Success(response) => Some(response),
            AuthOutcome::Failure(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthOutcome::Success(_) => None,
            AuthOutcome::Failure(err) => Some(&err.error_message),
        }
    }
}

impl From<crate::Result<AuthResponse>> for AuthOutcome {
    fn from(result: crate::Result<AuthResponse>) -> Self {
        match result {
            Ok(response) => AuthOutcome::Success(response),
            Err(err) => AuthOutcome::Failure(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> AuthResponse {
        AuthResponse {
            role_names: vec!["Full access".to_string()],
            user_identifier: "einstein".to_string(),
            key_lifetime_seconds: 3600,
            user_data: BTreeMap::from([(
                "mail".to_string(),
                "einstein@ldap.forumsys.com".to_string(),
            )]),
            user_info: serde_json::Map::new(),
            last_login: LastLogin::default(),
        }
    }

    #[test]
    fn test_success_wire_shape() {
        let value = serde_json::to_value(AuthOutcome::Success(sample_response())).unwrap();
        assert_eq!(
            value,
            json!({
                "roleNames": ["Full access"],
                "userIdentifier": "einstein",
                "keyLifetimeSeconds": 3600,
                "userData": {"mail": "einstein@ldap.forumsys.com"},
                "userInfo": {},
                "lastLogin": {"datetime": null, "ipAddress": null}
            })
        );
    }

    #[test]
    fn test_failure_wire_shape() {
        let outcome = AuthOutcome::Failure(ErrorResponse::new("denied"));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"errorMessage": "denied"})
        );

        let parsed: AuthOutcome = serde_json::from_str(r#"{"errorMessage":"denied"}"#).unwrap();
        assert_eq!(parsed.error_message(), Some("denied"));
    }

    #[test]
    fn test_password_is_not_debug_printed() {
        let payload = LoginPayload::new("einstein", "hunter2");
        let printed = format!("{:?}", payload);
        assert!(printed.contains("einstein"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_missing_login_fields_default_to_empty() {
        let payload: LoginPayload = serde_json::from_str(r#"{"username":"gauss"}"#).unwrap();
        assert_eq!(payload.username, "gauss");
        assert!(payload.password.is_empty());
    }
}
