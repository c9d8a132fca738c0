//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionStore`: login, registration, profile updates and logout
//! - `SessionData`: the user + token pair, and its durable record codec
//! - `AuthError`: display-ready failure message
//!
//! Sessions are persisted through a `KeyValueStore` and trusted on restore;
//! the server is only consulted again by `SessionStore::refresh_user`.

pub mod error;
pub mod session;
pub mod store;

pub use error::AuthError;
pub use session::{SessionData, SessionStatus};
pub use store::SessionStore;
