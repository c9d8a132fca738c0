//! REST API client module for the InternAIde backend.
//!
//! This module provides the `ApiClient` for the authentication and profile
//! endpoints. Authenticated calls use a JWT bearer token obtained from
//! login or registration.

pub mod client;
pub mod error;

pub use client::{ApiClient, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use error::ApiError;
