//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppState, Form, Page};

use super::shell;

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::Authenticating => return handle_auth_input(app, key).await,
        AppState::EditingProfile => {
            handle_profile_input(app, key).await?;
            return Ok(false);
        }
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            return Ok(false);
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                    app.ensure_authenticated();
                }
                _ => {}
            }
            return Ok(false);
        }
        AppState::Quitting => return Ok(true),
        AppState::Normal => {}
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('e') if app.current_page == Page::Profile => {
            app.start_profile_edit();
            return Ok(false);
        }
        KeyCode::Char('r') => {
            app.refresh_profile().await;
            return Ok(false);
        }
        _ => {}
    }

    // Shell navigation and logout
    if let Some(intent) = shell::intent_for_key(key, app.current_page) {
        let current_page = &mut app.current_page;
        shell::dispatch(intent, &mut app.session, &mut |page| *current_page = page);
        if !app.session.is_authenticated() {
            app.after_logout();
        }
    }

    Ok(false)
}

async fn handle_auth_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.toggle_auth_mode();
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Enter => {
            if app.auth_form.is_last_field() {
                app.submit_auth().await?;
            } else {
                app.auth_form.next_field();
            }
        }
        _ => edit_form(&mut app.auth_form, key),
    }
    Ok(false)
}

async fn handle_profile_input(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.state = AppState::Normal;
        }
        KeyCode::Enter => {
            app.submit_profile().await?;
        }
        _ => edit_form(&mut app.profile_form, key),
    }
    Ok(())
}

/// Field movement and text editing shared by every form overlay.
fn edit_form(form: &mut Form, key: KeyEvent) {
    match key.code {
        KeyCode::Down | KeyCode::Tab => form.next_field(),
        KeyCode::Up | KeyCode::BackTab => form.prev_field(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.push_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use internaide_core::api::ApiClient;
    use internaide_core::auth::SessionStore;
    use internaide_core::config::Config;
    use internaide_core::storage::{KeyValueStore, MemoryStore};

    use crate::app::AuthMode;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn offline_api() -> ApiClient {
        ApiClient::new("http://127.0.0.1:9", Duration::from_millis(100)).unwrap()
    }

    fn signed_in_app() -> (App, MemoryStore) {
        let storage = MemoryStore::new();
        storage.set("token", "tok-1").unwrap();
        storage
            .set(
                "user",
                r#"{"id":1,"email":"ada@example.com","name":"Ada Lovelace","created_at":"2024-03-01T10:00:00"}"#,
            )
            .unwrap();
        let session = SessionStore::open(offline_api(), storage.clone());
        (App::new(Config::default(), session), storage)
    }

    fn anonymous_app() -> App {
        let session = SessionStore::open(offline_api(), MemoryStore::new());
        App::new(Config::default(), session)
    }

    #[tokio::test]
    async fn test_anonymous_app_starts_on_login_overlay() {
        let app = anonymous_app();
        assert_eq!(app.state, AppState::Authenticating);
        assert_eq!(app.auth_mode, AuthMode::Login);
    }

    #[tokio::test]
    async fn test_ctrl_r_toggles_auth_mode() {
        let mut app = anonymous_app();
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        handle_input(&mut app, ctrl_r).await.unwrap();
        assert_eq!(app.auth_mode, AuthMode::Register);
        assert_eq!(app.auth_form.fields.len(), 7);
        handle_input(&mut app, ctrl_r).await.unwrap();
        assert_eq!(app.auth_mode, AuthMode::Login);
    }

    #[tokio::test]
    async fn test_typing_fills_focused_field() {
        let mut app = anonymous_app();
        for c in "ada".chars() {
            handle_input(&mut app, key(KeyCode::Char(c))).await.unwrap();
        }
        handle_input(&mut app, key(KeyCode::Backspace)).await.unwrap();
        assert_eq!(app.auth_form.value("Email"), "ad");

        // Enter on a non-final field moves on without submitting
        handle_input(&mut app, key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.auth_form.focus, 1);
        assert_eq!(app.state, AppState::Authenticating);
    }

    #[tokio::test]
    async fn test_submit_with_blank_password_reports_required() {
        let mut app = anonymous_app();
        handle_input(&mut app, key(KeyCode::Char('a'))).await.unwrap();
        handle_input(&mut app, key(KeyCode::Tab)).await.unwrap();
        handle_input(&mut app, key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.auth_form.error.as_deref(), Some("Password is required"));
        assert!(!app.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_escape_on_login_quits() {
        let mut app = anonymous_app();
        assert!(handle_input(&mut app, key(KeyCode::Esc)).await.unwrap());
    }

    #[tokio::test]
    async fn test_navigation_keys_change_page() {
        let (mut app, _) = signed_in_app();
        assert_eq!(app.state, AppState::Normal);
        handle_input(&mut app, key(KeyCode::Char('3'))).await.unwrap();
        assert_eq!(app.current_page, Page::Profile);
        handle_input(&mut app, key(KeyCode::Tab)).await.unwrap();
        assert_eq!(app.current_page, Page::Dashboard);
    }

    #[tokio::test]
    async fn test_logout_key_clears_session_and_shows_login() {
        let (mut app, storage) = signed_in_app();
        handle_input(&mut app, key(KeyCode::Char('2'))).await.unwrap();
        handle_input(&mut app, key(KeyCode::Char('l'))).await.unwrap();
        assert!(!app.session.is_authenticated());
        assert!(storage.is_empty());
        assert_eq!(app.state, AppState::Authenticating);
        assert_eq!(app.current_page, Page::Dashboard);
    }

    #[tokio::test]
    async fn test_profile_editor_opens_only_on_profile_page() {
        let (mut app, _) = signed_in_app();
        handle_input(&mut app, key(KeyCode::Char('e'))).await.unwrap();
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Char('3'))).await.unwrap();
        handle_input(&mut app, key(KeyCode::Char('e'))).await.unwrap();
        assert_eq!(app.state, AppState::EditingProfile);
        assert_eq!(app.profile_form.value("Name"), "Ada Lovelace");

        handle_input(&mut app, key(KeyCode::Esc)).await.unwrap();
        assert_eq!(app.state, AppState::Normal);
    }

    #[tokio::test]
    async fn test_unchanged_profile_submits_nothing() {
        let (mut app, _) = signed_in_app();
        app.current_page = Page::Profile;
        handle_input(&mut app, key(KeyCode::Char('e'))).await.unwrap();
        handle_input(&mut app, key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.status_message.as_deref(), Some("No changes"));
    }

    #[tokio::test]
    async fn test_failed_refresh_is_reported_as_error() {
        let (mut app, _) = signed_in_app();
        app.set_status("Profile updated");
        assert!(!app.status_is_error);

        handle_input(&mut app, key(KeyCode::Char('r'))).await.unwrap();
        assert_eq!(app.status_message.as_deref(), Some("Could not load profile"));
        assert!(app.status_is_error);
        assert!(app.session.is_authenticated());
        assert!(!app.listings_loaded);
    }

    #[tokio::test]
    async fn test_invalid_profile_url_blocks_submit() {
        let (mut app, _) = signed_in_app();
        app.current_page = Page::Profile;
        handle_input(&mut app, key(KeyCode::Char('e'))).await.unwrap();
        // Name, Phone, then GitHub
        handle_input(&mut app, key(KeyCode::Tab)).await.unwrap();
        handle_input(&mut app, key(KeyCode::Tab)).await.unwrap();
        for c in "gitlab.com/ada".chars() {
            handle_input(&mut app, key(KeyCode::Char(c))).await.unwrap();
        }
        handle_input(&mut app, key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state, AppState::EditingProfile);
        assert_eq!(
            app.profile_form.error.as_deref(),
            Some("Please enter a valid GitHub URL")
        );
    }

    #[tokio::test]
    async fn test_quit_confirmation() {
        let (mut app, _) = signed_in_app();
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))).await.unwrap());
        assert_eq!(app.state, AppState::ConfirmingQuit);
        assert!(!handle_input(&mut app, key(KeyCode::Char('n'))).await.unwrap());
        assert_eq!(app.state, AppState::Normal);
        handle_input(&mut app, key(KeyCode::Char('q'))).await.unwrap();
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))).await.unwrap());
    }
}
