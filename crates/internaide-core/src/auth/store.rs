//! The session store: single owner of "who is logged in".
//!
//! Lifecycle: `new` → `restore` (once) → `login` / `register` /
//! `update_profile` / `logout`. `open` does the first two steps.
//! `list_cvs` and `list_applications` read with the session's token.
//!
//! Every mutating operation takes `&mut self`, so one store can never run
//! two of them at once. Each operation writes the durable record before it
//! returns; there is no separate save step.

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{Application, AuthResponse, Cv, ProfileUpdate, Registration, User};
use crate::storage::KeyValueStore;

use super::session::{self, SessionData, SessionStatus};
use super::AuthError;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";
const PROFILE_UPDATE_FAILED: &str = "Profile update failed";
const PROFILE_LOAD_FAILED: &str = "Could not load profile";
const CVS_LOAD_FAILED: &str = "Could not load CVs";
const APPLICATIONS_LOAD_FAILED: &str = "Could not load applications";
const NOT_LOGGED_IN: &str = "Not logged in";

pub struct SessionStore {
    api: ApiClient,
    storage: Box<dyn KeyValueStore>,
    data: Option<SessionData>,
    is_loading: bool,
}

impl SessionStore {
    /// Create an uninitialized store. Call `restore` before relying on it.
    pub fn new(api: ApiClient, storage: impl KeyValueStore + 'static) -> Self {
        Self {
            api,
            storage: Box::new(storage),
            data: None,
            is_loading: true,
        }
    }

    /// Create a store and restore any saved session.
    pub fn open(api: ApiClient, storage: impl KeyValueStore + 'static) -> Self {
        let mut store = Self::new(api, storage);
        store.restore();
        store
    }

    /// Load the durable record without touching the network. The stored token
    /// is trusted as-is. Runs once; later calls do nothing.
    pub fn restore(&mut self) {
        if !self.is_loading {
            debug!("Session already restored");
            return;
        }

        self.data = session::load_record(self.storage.as_ref());
        self.is_loading = false;

        match self.data {
            Some(ref data) => info!(user_id = data.user.id, "Session restored"),
            None => debug!("Starting without a session"),
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let response = self
            .api
            .login(email, password)
            .await
            .map_err(|e| AuthError::from_api(&e, LOGIN_FAILED))?;

        self.establish(response);
        info!("Login successful");
        Ok(())
    }

    pub async fn register(&mut self, registration: &Registration) -> Result<(), AuthError> {
        let response = self
            .api
            .register(registration)
            .await
            .map_err(|e| AuthError::from_api(&e, REGISTRATION_FAILED))?;

        self.establish(response);
        info!("Registration successful");
        Ok(())
    }

    /// Drop the session in memory and on disk. Never fails; safe to repeat.
    pub fn logout(&mut self) {
        if let Some(data) = self.data.take() {
            info!(user_id = data.user.id, "Logged out");
        }
        session::clear_record(self.storage.as_ref());
    }

    /// Send the fields set in `update` and adopt the server's copy of the user.
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> Result<(), AuthError> {
        let token = self.require_token()?;

        let user = self
            .api
            .update_profile(&token, update)
            .await
            .map_err(|e| AuthError::from_api(&e, PROFILE_UPDATE_FAILED))?;

        self.replace_user(user);
        info!("Profile updated");
        Ok(())
    }

    /// Re-fetch the user for the current token. A 401 means the stored token
    /// is no longer accepted, and the session is torn down.
    pub async fn refresh_user(&mut self) -> Result<(), AuthError> {
        let token = self.require_token()?;
        let result = self.api.fetch_profile(&token).await;
        let user = self.authorized(result, PROFILE_LOAD_FAILED)?;
        self.replace_user(user);
        Ok(())
    }

    /// The signed-in user's CVs. A 401 ends the session like `refresh_user`.
    pub async fn list_cvs(&mut self) -> Result<Vec<Cv>, AuthError> {
        let token = self.require_token()?;
        let result = self.api.list_cvs(&token).await;
        self.authorized(result, CVS_LOAD_FAILED)
    }

    /// The signed-in user's applications. A 401 ends the session like `refresh_user`.
    pub async fn list_applications(&mut self) -> Result<Vec<Application>, AuthError> {
        let token = self.require_token()?;
        let result = self.api.list_applications(&token).await;
        self.authorized(result, APPLICATIONS_LOAD_FAILED)
    }

    /// Map an API failure to a display message, logging out on 401.
    fn authorized<T>(&mut self, result: Result<T, ApiError>, fallback: &str) -> Result<T, AuthError> {
        result.map_err(|e| {
            let err = AuthError::from_api(&e, fallback);
            if e.is_unauthorized() {
                warn!("Stored token rejected, ending session");
                self.logout();
            }
            err
        })
    }

    fn establish(&mut self, response: AuthResponse) {
        let data = SessionData {
            token: response.access_token,
            user: response.user,
        };
        session::save_record(self.storage.as_ref(), &data);
        debug!(user_id = data.user.id, "Session established");
        self.data = Some(data);
    }

    fn replace_user(&mut self, user: User) {
        session::save_user(self.storage.as_ref(), &user);
        if let Some(ref mut data) = self.data {
            data.user = user;
        }
    }

    fn require_token(&self) -> Result<String, AuthError> {
        self.token()
            .map(str::to_string)
            .ok_or_else(|| AuthError::new(NOT_LOGGED_IN))
    }

    // ===== Accessors =====

    pub fn user(&self) -> Option<&User> {
        self.data.as_ref().map(|d| &d.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.token.as_str())
    }

    pub fn session(&self) -> Option<&SessionData> {
        self.data.as_ref()
    }

    /// True until `restore` has run.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.is_some()
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_loading {
            SessionStatus::Uninitialized
        } else if self.data.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
