//! API client for communicating with the InternAIde REST API.
//!
//! This module provides the `ApiClient` struct for the authentication and
//! profile endpoints. Responses are checked with `check_response`, which
//! turns non-2xx statuses into `ApiError::Rejected` carrying the server's
//! `detail` message.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{Application, AuthResponse, Cv, ProfileUpdate, Registration, User};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL used when neither the environment nor the config names one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const LOGIN_PATH: &str = "/api/auth/login";
const REGISTER_PATH: &str = "/api/auth/register";
const PROFILE_PATH: &str = "/api/user/profile";
const CVS_PATH: &str = "/api/cvs";
const APPLICATIONS_PATH: &str = "/api/applications";

/// API client for InternAIde.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange email and password for a bearer token (form-encoded).
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        debug!(email = email, "POST {}", LOGIN_PATH);
        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;

        Self::parse(Self::check_response(response).await?).await
    }

    /// Create an account and receive a bearer token (JSON body).
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        debug!(email = %registration.email, "POST {}", REGISTER_PATH);
        let response = self
            .client
            .post(self.url(REGISTER_PATH))
            .json(registration)
            .send()
            .await?;

        Self::parse(Self::check_response(response).await?).await
    }

    /// Fetch the profile belonging to `token`.
    pub async fn fetch_profile(&self, token: &str) -> Result<User, ApiError> {
        debug!("GET {}", PROFILE_PATH);
        let response = self
            .client
            .get(self.url(PROFILE_PATH))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse(Self::check_response(response).await?).await
    }

    /// Send the changed profile fields (form-encoded). The server answers with
    /// the full, updated user record.
    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        debug!(?update, "PUT {}", PROFILE_PATH);
        let response = self
            .client
            .put(self.url(PROFILE_PATH))
            .bearer_auth(token)
            .form(update)
            .send()
            .await?;

        Self::parse(Self::check_response(response).await?).await
    }

    /// List the CVs uploaded by the owner of `token`.
    pub async fn list_cvs(&self, token: &str) -> Result<Vec<Cv>, ApiError> {
        debug!("GET {}", CVS_PATH);
        let response = self
            .client
            .get(self.url(CVS_PATH))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse(Self::check_response(response).await?).await
    }

    /// List the applications tracked by the owner of `token`.
    pub async fn list_applications(&self, token: &str) -> Result<Vec<Application>, ApiError> {
        debug!("GET {}", APPLICATIONS_PATH);
        let response = self
            .client
            .get(self.url(APPLICATIONS_PATH))
            .bearer_auth(token)
            .send()
            .await?;

        Self::parse(Self::check_response(response).await?).await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}
