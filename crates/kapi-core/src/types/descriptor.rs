//! Form field descriptors for the host's login and configuration dialogs

use serde::{Deserialize, Serialize};

use super::ProviderConfig;

/// Input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Password,
    Number,
}

/// One field of a host dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,

    pub display: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    pub length: u32,

    #[serde(rename = "helpURL", default)]
    pub help_url: String,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        display: impl Into<String>,
        field_type: FieldType,
        length: u32,
    ) -> Self {
        Self {
            name: name.into(),
            display: display.into(),
            description: None,
            field_type,
            length,
            help_url: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Help link shown under a dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub display: String,
    pub url: String,
}

/// Description of the login dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInfo {
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Current configuration plus the fields the host lets an admin edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub current: ProviderConfig,
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl LoginInfo {
    /// Username/password form
    pub fn username_password() -> Self {
        Self {
            fields: vec![
                FieldDescriptor::new("username", "User name", FieldType::Text, 40)
                    .with_description("Enter your Username, e.g. einstein"),
                FieldDescriptor::new("password", "Password", FieldType::Password, 40)
                    .with_description("Enter your password, e.g. password"),
            ],
            links: Vec::new(),
        }
    }
}

impl ConfigInfo {
    pub fn for_config(current: ProviderConfig) -> Self {
        Self {
            current,
            fields: vec![
                FieldDescriptor::new("serverName", "LDAP Server Name", FieldType::Text, 40),
                FieldDescriptor::new(
                    "keyLifetimeMinutes",
                    "API Key Lifetime (Minutes)",
                    FieldType::Number,
                    8,
                ),
            ],
            links: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_info_wire_shape() {
        let value = serde_json::to_value(LoginInfo::username_password()).unwrap();
        assert_eq!(
            value["fields"][1],
            json!({
                "name": "password",
                "display": "Password",
                "description": "Enter your password, e.g. password",
                "type": "password",
                "length": 40,
                "helpURL": ""
            })
        );
        assert_eq!(value["links"], json!([]));
    }

    #[test]
    fn test_config_info_reports_current_values() {
        let info = ConfigInfo::for_config(ProviderConfig::default());
        let value = serde_json::to_value(&info).unwrap();

        assert_eq!(
            value["current"],
            json!({"serverName": "ldap://ldap.forumsys.com", "keyLifetimeMinutes": 60})
        );
        assert_eq!(value["fields"][1]["type"], "number");
        assert_eq!(value["fields"][1]["length"], 8);
        assert!(value["fields"][0].get("description").is_none());
    }
}
