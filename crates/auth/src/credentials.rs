//! HTTP basic-auth credential parsing.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("authorization header does not use the Basic scheme")]
    NotBasic,

    #[error("credential payload is not valid base64")]
    InvalidBase64,

    #[error("credential payload is not valid utf-8")]
    InvalidUtf8,

    #[error("credential payload is missing the ':' separator")]
    MissingSeparator,
}

/// Plaintext credentials extracted from an `Authorization: Basic` header.
///
/// These live only for the duration of a request; persistence always goes
/// through [`crate::HashedPassword`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parse the value of an `Authorization` header,
    /// e.g. `Basic dXNlcjpwYXNz`.
    pub fn parse(header_value: &str) -> Result<Self, CredentialError> {
        let payload = header_value
            .strip_prefix("Basic ")
            .ok_or(CredentialError::NotBasic)?
            .trim();

        let decoded = BASE64
            .decode(payload)
            .map_err(|_| CredentialError::InvalidBase64)?;
        let decoded = String::from_utf8(decoded).map_err(|_| CredentialError::InvalidUtf8)?;

        // Passwords may themselves contain ':'; only the first one splits.
        let (username, password) = decoded
            .split_once(':')
            .ok_or(CredentialError::MissingSeparator)?;

        Ok(Self::new(username, password))
    }

    /// Encode back into an `Authorization` header value.
    pub fn to_header_value(&self) -> String {
        let payload = BASE64.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {payload}")
    }
}
