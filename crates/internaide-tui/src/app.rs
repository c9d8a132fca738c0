//! Application state management for the InternAIde terminal client.
//!
//! The `App` owns the session store and the UI state around it: which page
//! is showing, which overlay is open, and the contents of the login,
//! registration and profile forms.

use anyhow::Result;
use tracing::{info, warn};

use internaide_core::auth::SessionStore;
use internaide_core::config::Config;
use internaide_core::models::{Application, Cv, ProfileUpdate, Registration, User};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for email input.
/// RFC 5321 caps an address at 254 characters.
const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for names, phone numbers and URLs.
const MAX_TEXT_LENGTH: usize = 200;

// ============================================================================
// UI State Types
// ============================================================================

/// Pages reachable from the shell navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Cvs,
    Profile,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Cvs, Page::Profile];

    /// Get the display title for this page.
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Cvs => "CVs",
            Page::Profile => "Profile",
        }
    }

    /// Get the next page (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Page::Dashboard => Page::Cvs,
            Page::Cvs => Page::Profile,
            Page::Profile => Page::Dashboard,
        }
    }

    /// Get the previous page (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Page::Dashboard => Page::Profile,
            Page::Cvs => Page::Dashboard,
            Page::Profile => Page::Cvs,
        }
    }
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    Authenticating,
    EditingProfile,
    ConfirmingQuit,
    Quitting,
}

/// Which form the authentication overlay shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

// ============================================================================
// Forms
// ============================================================================

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    pub secret: bool,
    pub required: bool,
    max_len: usize,
}

impl FormField {
    fn new(label: &'static str, max_len: usize) -> Self {
        Self {
            label,
            value: String::new(),
            secret: false,
            required: false,
            max_len,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    fn with_value(mut self, value: Option<&str>) -> Self {
        self.value = value.unwrap_or_default().to_string();
        self
    }

    /// Trimmed value, `None` when blank
    fn optional(&self) -> Option<String> {
        let trimmed = self.value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// A vertical list of text fields with one focused field and an error line.
#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
}

impl Form {
    fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn login(email: Option<&str>) -> Self {
        let mut form = Self::new(vec![
            FormField::new("Email", MAX_EMAIL_LENGTH).required().with_value(email),
            FormField::new("Password", MAX_PASSWORD_LENGTH).required().secret(),
        ]);
        // Jump straight to the password when the email is remembered
        if email.is_some_and(|e| !e.is_empty()) {
            form.focus = 1;
        }
        form
    }

    pub fn register() -> Self {
        Self::new(vec![
            FormField::new("Email", MAX_EMAIL_LENGTH).required(),
            FormField::new("Name", MAX_TEXT_LENGTH).required(),
            FormField::new("Password", MAX_PASSWORD_LENGTH).required().secret(),
            FormField::new("Phone", MAX_TEXT_LENGTH),
            FormField::new("GitHub", MAX_TEXT_LENGTH),
            FormField::new("LinkedIn", MAX_TEXT_LENGTH),
            FormField::new("Portfolio", MAX_TEXT_LENGTH),
        ])
    }

    pub fn profile(user: &User) -> Self {
        Self::new(vec![
            FormField::new("Name", MAX_TEXT_LENGTH).required().with_value(Some(user.name.as_str())),
            FormField::new("Phone", MAX_TEXT_LENGTH).with_value(user.phone.as_deref()),
            FormField::new("GitHub", MAX_TEXT_LENGTH).with_value(user.github_url.as_deref()),
            FormField::new("LinkedIn", MAX_TEXT_LENGTH).with_value(user.linkedin_url.as_deref()),
            FormField::new("Portfolio", MAX_TEXT_LENGTH).with_value(user.portfolio_url.as_deref()),
        ])
    }

    pub fn next_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn is_last_field(&self) -> bool {
        self.focus + 1 == self.fields.len()
    }

    /// Append a character to the focused field if it passes validation.
    pub fn push_char(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            if can_add_char(field.value.chars().count(), c, field.max_len) {
                field.value.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    pub fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or_default()
    }

    fn optional(&self, label: &str) -> Option<String> {
        self.fields.iter().find(|f| f.label == label).and_then(FormField::optional)
    }

    /// Warning for the first link field whose URL doesn't fit its site.
    pub fn invalid_url(&self) -> Option<&'static str> {
        self.fields.iter().find_map(|f| {
            let value = f.value.trim();
            if value.is_empty() {
                return None;
            }
            match f.label {
                "GitHub" if !is_site_url(value, "github.com/") => {
                    Some("Please enter a valid GitHub URL")
                }
                "LinkedIn" if !is_site_url(value, "linkedin.com/in/") => {
                    Some("Please enter a valid LinkedIn URL")
                }
                "Portfolio" if strip_scheme(value).map_or(true, str::is_empty) => {
                    Some("Please enter a valid URL")
                }
                _ => None,
            }
        })
    }

    /// Label of the first required field left blank.
    pub fn missing_required(&self) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.required && f.value.trim().is_empty())
            .map(|f| f.label)
    }

    fn to_registration(&self) -> Registration {
        Registration {
            email: self.value("Email").trim().to_string(),
            name: self.value("Name").trim().to_string(),
            password: self.value("Password").to_string(),
            phone: self.optional("Phone"),
            github_url: self.optional("GitHub"),
            linkedin_url: self.optional("LinkedIn"),
            portfolio_url: self.optional("Portfolio"),
        }
    }

    fn to_profile_update(&self) -> ProfileUpdate {
        let field = |label: &str| Some(self.value(label).trim().to_string());
        ProfileUpdate {
            name: field("Name"),
            phone: field("Phone"),
            github_url: field("GitHub"),
            linkedin_url: field("LinkedIn"),
            portfolio_url: field("Portfolio"),
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

/// Main application state container
pub struct App {
    // Core services
    pub config: Config,
    pub session: SessionStore,

    // UI State
    pub state: AppState,
    pub current_page: Page,
    pub auth_mode: AuthMode,
    pub auth_form: Form,
    pub profile_form: Form,

    // Listings shown on the Dashboard and CVs pages
    pub cvs: Vec<Cv>,
    pub applications: Vec<Application>,
    pub listings_loaded: bool,

    // Status message
    pub status_message: Option<String>,
    pub status_is_error: bool,
}

impl App {
    /// Create the application around an already restored session.
    pub fn new(config: Config, session: SessionStore) -> Self {
        let auth_form = Form::login(config.last_email.as_deref());
        let mut app = Self {
            config,
            session,
            state: AppState::Normal,
            current_page: Page::Dashboard,
            auth_mode: AuthMode::Login,
            auth_form,
            profile_form: Form::new(Vec::new()),
            cvs: Vec::new(),
            applications: Vec::new(),
            listings_loaded: false,
            status_message: None,
            status_is_error: false,
        };
        app.ensure_authenticated();
        app
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = true;
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Show the login overlay whenever there is no session.
    pub fn ensure_authenticated(&mut self) {
        if !self.session.is_authenticated() && self.state != AppState::Authenticating {
            self.start_login();
        }
    }

    /// Start the login process (show login overlay)
    pub fn start_login(&mut self) {
        self.auth_mode = AuthMode::Login;
        self.auth_form = Form::login(self.config.last_email.as_deref());
        self.state = AppState::Authenticating;
    }

    pub fn start_register(&mut self) {
        self.auth_mode = AuthMode::Register;
        self.auth_form = Form::register();
        self.state = AppState::Authenticating;
    }

    pub fn toggle_auth_mode(&mut self) {
        match self.auth_mode {
            AuthMode::Login => self.start_register(),
            AuthMode::Register => self.start_login(),
        }
    }

    /// Submit the login or registration form.
    pub async fn submit_auth(&mut self) -> Result<()> {
        if let Some(label) = self.auth_form.missing_required() {
            self.auth_form.error = Some(format!("{} is required", label));
            return Ok(());
        }
        if let Some(warning) = self.auth_form.invalid_url() {
            self.auth_form.error = Some(warning.to_string());
            return Ok(());
        }
        self.auth_form.error = None;

        let email = self.auth_form.value("Email").trim().to_string();
        let result = match self.auth_mode {
            AuthMode::Login => {
                let password = self.auth_form.value("Password").to_string();
                self.session.login(&email, &password).await
            }
            AuthMode::Register => {
                let registration = self.auth_form.to_registration();
                self.session.register(&registration).await
            }
        };

        match result {
            Ok(()) => {
                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.auth_form = Form::login(self.config.last_email.as_deref());
                self.state = AppState::Normal;
                self.current_page = Page::Dashboard;
                if let Some(email) = self.session.user().map(|u| u.email.clone()) {
                    self.set_status(format!("Signed in as {}", email));
                }
                self.load_listings().await;
            }
            Err(e) => {
                self.auth_form.error = Some(e.message().to_string());
            }
        }
        Ok(())
    }

    /// Called after the shell's logout action.
    pub fn after_logout(&mut self) {
        self.set_status("Logged out");
        self.cvs.clear();
        self.applications.clear();
        self.listings_loaded = false;
        self.current_page = Page::Dashboard;
        self.start_login();
    }

    // =========================================================================
    // Profile
    // =========================================================================

    pub fn start_profile_edit(&mut self) {
        if let Some(user) = self.session.user() {
            self.profile_form = Form::profile(user);
            self.state = AppState::EditingProfile;
        }
    }

    /// Send the changed profile fields, keeping the editor open on failure.
    pub async fn submit_profile(&mut self) -> Result<()> {
        if let Some(label) = self.profile_form.missing_required() {
            self.profile_form.error = Some(format!("{} is required", label));
            return Ok(());
        }
        if let Some(warning) = self.profile_form.invalid_url() {
            self.profile_form.error = Some(warning.to_string());
            return Ok(());
        }

        let Some(user) = self.session.user() else {
            self.ensure_authenticated();
            return Ok(());
        };
        let update = ProfileUpdate::diff(user, &self.profile_form.to_profile_update());
        if update.is_empty() {
            self.state = AppState::Normal;
            self.set_status("No changes");
            return Ok(());
        }

        match self.session.update_profile(&update).await {
            Ok(()) => {
                self.state = AppState::Normal;
                self.set_status("Profile updated");
            }
            Err(e) => {
                self.profile_form.error = Some(e.message().to_string());
            }
        }
        Ok(())
    }

    /// Re-validate the stored token against the server and reload listings.
    pub async fn refresh_profile(&mut self) {
        match self.session.refresh_user().await {
            Ok(()) => {
                info!("Profile refreshed");
                self.set_status("Profile refreshed");
                self.load_listings().await;
            }
            Err(e) => self.report_session_error(e.message()),
        }
    }

    // =========================================================================
    // Listings
    // =========================================================================

    /// Fetch the user's CVs and applications. Stops at the first failure.
    pub async fn load_listings(&mut self) {
        if !self.session.is_authenticated() {
            return;
        }

        match self.session.list_applications().await {
            Ok(applications) => self.applications = applications,
            Err(e) => {
                self.report_session_error(e.message());
                return;
            }
        }
        match self.session.list_cvs().await {
            Ok(cvs) => self.cvs = cvs,
            Err(e) => {
                self.report_session_error(e.message());
                return;
            }
        }
        self.listings_loaded = true;
    }

    /// Show a failed session call; back to the login overlay if it ended the session.
    fn report_session_error(&mut self, message: &str) {
        let message = message.to_string();
        if !self.session.is_authenticated() {
            self.after_logout();
        }
        self.set_error(message);
    }
}

/// `url` is http(s), optionally `www.`, then `site` followed by a non-empty path.
fn is_site_url(url: &str, site: &str) -> bool {
    strip_scheme(url)
        .map(|rest| rest.strip_prefix("www.").unwrap_or(rest))
        .and_then(|rest| rest.strip_prefix(site))
        .is_some_and(|path| !path.is_empty())
}

fn strip_scheme(url: &str) -> Option<&str> {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
}

/// Check if a character is valid for text input (printable, not control)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a character can be added to a field of the given length
pub fn can_add_char(current_len: usize, c: char, max_len: usize) -> bool {
    current_len < max_len && is_valid_input_char(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            email: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            phone: Some("555-0100".to_string()),
            github_url: None,
            linkedin_url: None,
            portfolio_url: None,
            created_at: "2024-03-01T10:00:00".to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Page Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_page_next() {
        assert_eq!(Page::Dashboard.next(), Page::Cvs);
        assert_eq!(Page::Cvs.next(), Page::Profile);
        assert_eq!(Page::Profile.next(), Page::Dashboard); // Wraps around
    }

    #[test]
    fn test_page_prev() {
        assert_eq!(Page::Dashboard.prev(), Page::Profile); // Wraps around
        assert_eq!(Page::Profile.prev(), Page::Cvs);
        assert_eq!(Page::Cvs.prev(), Page::Dashboard);
    }

    // -------------------------------------------------------------------------
    // Form Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_login_form_focus_with_remembered_email() {
        assert_eq!(Form::login(None).focus, 0);
        assert_eq!(Form::login(Some("")).focus, 0);
        let form = Form::login(Some("ada@example.com"));
        assert_eq!(form.focus, 1);
        assert_eq!(form.value("Email"), "ada@example.com");
    }

    #[test]
    fn test_form_field_cycling() {
        let mut form = Form::login(None);
        form.prev_field();
        assert_eq!(form.focus, 1);
        assert!(form.is_last_field());
        form.next_field();
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_form_typing_and_missing_required() {
        let mut form = Form::login(None);
        assert_eq!(form.missing_required(), Some("Email"));
        for c in "a@b.c".chars() {
            form.push_char(c);
        }
        form.push_char('\n'); // rejected
        assert_eq!(form.value("Email"), "a@b.c");
        form.backspace();
        assert_eq!(form.value("Email"), "a@b.");
        assert_eq!(form.missing_required(), Some("Password"));
    }

    #[test]
    fn test_registration_from_form() {
        let mut form = Form::register();
        form.fields[0].value = " ada@example.com ".to_string();
        form.fields[1].value = "Ada".to_string();
        form.fields[2].value = " pw ".to_string();
        form.fields[4].value = "https://github.com/ada".to_string();
        let reg = form.to_registration();
        assert_eq!(reg.email, "ada@example.com");
        assert_eq!(reg.password, " pw "); // passwords are not trimmed
        assert_eq!(reg.phone, None);
        assert_eq!(reg.github_url.as_deref(), Some("https://github.com/ada"));
    }

    #[test]
    fn test_profile_form_round_trips_unchanged_user() {
        let user = sample_user();
        let form = Form::profile(&user);
        assert!(ProfileUpdate::diff(&user, &form.to_profile_update()).is_empty());
    }

    #[test]
    fn test_profile_form_sends_only_edits() {
        let user = sample_user();
        let mut form = Form::profile(&user);
        form.fields[0].value = "Ada King".to_string();
        let update = ProfileUpdate::diff(&user, &form.to_profile_update());
        assert_eq!(update.name.as_deref(), Some("Ada King"));
        assert!(update.phone.is_none());
    }

    #[test]
    fn test_profile_url_validation() {
        let user = sample_user();
        let mut form = Form::profile(&user);
        assert_eq!(form.invalid_url(), None);

        form.fields[2].value = "github.com/ada".to_string();
        assert_eq!(form.invalid_url(), Some("Please enter a valid GitHub URL"));
        form.fields[2].value = "https://www.github.com/ada".to_string();
        assert_eq!(form.invalid_url(), None);

        form.fields[3].value = "https://linkedin.com/company/acme".to_string();
        assert_eq!(form.invalid_url(), Some("Please enter a valid LinkedIn URL"));
        form.fields[3].value = "http://linkedin.com/in/ada".to_string();
        assert_eq!(form.invalid_url(), None);

        form.fields[4].value = "ada.dev".to_string();
        assert_eq!(form.invalid_url(), Some("Please enter a valid URL"));
        form.fields[4].value = "https://".to_string();
        assert_eq!(form.invalid_url(), Some("Please enter a valid URL"));
        form.fields[4].value = "https://ada.dev".to_string();
        assert_eq!(form.invalid_url(), None);
    }

    #[test]
    fn test_site_url() {
        assert!(is_site_url("https://github.com/ada", "github.com/"));
        assert!(!is_site_url("https://github.com/", "github.com/"));
        assert!(!is_site_url("ftp://github.com/ada", "github.com/"));
        assert!(!is_site_url("https://gitlab.com/ada", "github.com/"));
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_char() {
        assert!(can_add_char(0, 'a', MAX_PASSWORD_LENGTH));
        assert!(can_add_char(127, '!', MAX_PASSWORD_LENGTH));
        assert!(!can_add_char(128, 'a', MAX_PASSWORD_LENGTH));
        assert!(!can_add_char(0, '\x00', MAX_EMAIL_LENGTH));
        assert!(!can_add_char(0, '\t', MAX_EMAIL_LENGTH));
    }
}
