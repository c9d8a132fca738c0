use thiserror::Error;
use tracing::warn;

use crate::api::ApiError;

/// A failed session operation, carrying a message fit to show the user.
///
/// Transport and server-side failures end up in the same shape: a message
/// for the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The server's `detail` when it sent one, otherwise `fallback`.
    pub fn from_api(err: &ApiError, fallback: &str) -> Self {
        warn!(error = %err, "{}", fallback);
        Self::new(err.detail().unwrap_or(fallback))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_api_prefers_detail() {
        let err = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"detail":"Email already registered"}"#);
        assert_eq!(
            AuthError::from_api(&err, "Registration failed").message(),
            "Email already registered"
        );
    }

    #[test]
    fn test_from_api_falls_back() {
        let err = ApiError::InvalidResponse("eof".to_string());
        let auth = AuthError::from_api(&err, "Login failed");
        assert_eq!(auth.message(), "Login failed");
        assert_eq!(auth.to_string(), "Login failed");
    }
}
