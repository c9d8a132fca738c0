use tracing::{debug, warn};

use crate::models::User;
use crate::storage::KeyValueStore;

/// Storage key holding the bearer token verbatim
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-serialized user
pub const USER_KEY: &str = "user";

/// An authenticated identity: the user and the token that proves it.
///
/// Holding both in one value means a session can never carry a user
/// without a token or the other way round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub token: String,
    pub user: User,
}

/// Where the session store is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// `restore` has not run yet
    Uninitialized,
    Anonymous,
    Authenticated,
}

/// Read the durable record. Absent, partial or unparseable records come
/// back as `None`; partial and corrupt ones are erased so they don't linger.
pub fn load_record(storage: &dyn KeyValueStore) -> Option<SessionData> {
    let token = read_key(storage, TOKEN_KEY);
    let user_json = read_key(storage, USER_KEY);

    match (token, user_json) {
        (Some(token), Some(user_json)) => match serde_json::from_str::<User>(&user_json) {
            Ok(user) if !token.is_empty() => Some(SessionData { token, user }),
            Ok(_) => {
                warn!("Stored session has an empty token, discarding");
                clear_record(storage);
                None
            }
            Err(e) => {
                warn!(error = %e, "Stored user record is unreadable, discarding session");
                clear_record(storage);
                None
            }
        },
        (None, None) => {
            debug!("No stored session");
            None
        }
        (token, _) => {
            warn!(
                has_token = token.is_some(),
                "Stored session is incomplete, discarding"
            );
            clear_record(storage);
            None
        }
    }
}

fn read_key(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key = key, error = %e, "Failed to read session storage");
            None
        }
    }
}

/// Write both halves of the record. Failures are logged, not returned: the
/// in-memory session stays valid for this process either way.
pub fn save_record(storage: &dyn KeyValueStore, data: &SessionData) {
    if let Err(e) = storage.set(TOKEN_KEY, &data.token) {
        warn!(error = %e, "Failed to save session token");
    }
    save_user(storage, &data.user);
}

/// Rewrite only the user half of the record.
pub fn save_user(storage: &dyn KeyValueStore, user: &User) {
    match serde_json::to_string(user) {
        Ok(json) => {
            if let Err(e) = storage.set(USER_KEY, &json) {
                warn!(error = %e, "Failed to save session user");
            }
        }
        Err(e) => warn!(error = %e, "Failed to serialize session user"),
    }
}

/// Erase both keys.
pub fn clear_record(storage: &dyn KeyValueStore) {
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(e) = storage.remove(key) {
            warn!(key = key, error = %e, "Failed to erase session storage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn sample() -> SessionData {
        SessionData {
            token: "tok-123".to_string(),
            user: User {
                id: 1,
                email: "ada@example.com".to_string(),
                name: "Ada Lovelace".to_string(),
                phone: Some("555-0100".to_string()),
                github_url: None,
                linkedin_url: None,
                portfolio_url: None,
                created_at: "2024-03-01T10:00:00".to_string(),
            },
        }
    }

    #[test]
    fn test_save_then_load() {
        let storage = MemoryStore::new();
        save_record(&storage, &sample());
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-123"));
        assert_eq!(load_record(&storage), Some(sample()));
    }

    #[test]
    fn test_empty_storage_loads_nothing() {
        assert_eq!(load_record(&MemoryStore::new()), None);
    }

    #[test]
    fn test_token_only_is_discarded() {
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        assert_eq!(load_record(&storage), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_user_only_is_discarded() {
        let storage = MemoryStore::new();
        save_user(&storage, &sample().user);
        assert_eq!(load_record(&storage), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_unparseable_user_is_discarded() {
        let storage = MemoryStore::new();
        storage.set(TOKEN_KEY, "tok").unwrap();
        storage.set(USER_KEY, "{\"id\": \"not a number\"}").unwrap();
        assert_eq!(load_record(&storage), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clear_record() {
        let storage = MemoryStore::new();
        save_record(&storage, &sample());
        clear_record(&storage);
        assert!(storage.is_empty());
        // Clearing twice is harmless
        clear_record(&storage);
    }
}
