//! Error types for Kapi

use thiserror::Error;

use crate::types::ErrorResponse;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Request Errors
    #[error("{0}")]
    InvalidRequest(String),

    // Directory Errors
    #[error("Unable to authenticate with LDAP server: {0}")]
    Bind(String),

    #[error("{0}")]
    Directory(String),

    // Access Errors
    #[error("User {username} is neither a mathematician nor a scientist: access denied.")]
    AccessDenied { username: String },

    // Configuration Errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidRequest(_) => "InvalidRequest",
            Error::Bind(_) => "BindFailed",
            Error::Directory(_) => "DirectoryError",
            Error::AccessDenied { .. } => "AccessDenied",
            Error::Config(_) => "ConfigError",
            Error::Io(_) => "InternalError",
        }
    }

    /// Whether the failure came from the caller's credentials rather than
    /// from the provider or the directory server.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Error::InvalidRequest(_) | Error::Bind(_) | Error::AccessDenied { .. }
        )
    }
}

impl From<Error> for ErrorResponse {
    fn from(err: Error) -> Self {
        ErrorResponse::new(err.to_string())
    }
}
