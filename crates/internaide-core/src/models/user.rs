use serde::{Deserialize, Serialize};

/// An InternAIde account as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    /// Server timestamp, kept verbatim. The API emits naive ISO datetimes.
    pub created_at: String,
}

impl User {
    /// Links the user has filled in, as (label, url) pairs.
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", self.github_url.as_deref()),
            ("LinkedIn", self.linkedin_url.as_deref()),
            ("Portfolio", self.portfolio_url.as_deref()),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.filter(|u| !u.is_empty()).map(|u| (label, u)))
        .collect()
    }
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

/// Partial profile for `PUT /api/user/profile`. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
}

impl ProfileUpdate {
    /// Build an update holding only the fields that differ from `current`.
    /// An empty value and a missing one compare equal.
    pub fn diff(current: &User, edited: &ProfileUpdate) -> Self {
        fn changed(old: Option<&str>, new: &Option<String>) -> Option<String> {
            match new {
                Some(value) if value.as_str() != old.unwrap_or("") => Some(value.clone()),
                _ => None,
            }
        }

        Self {
            name: changed(Some(current.name.as_str()), &edited.name),
            phone: changed(current.phone.as_deref(), &edited.phone),
            github_url: changed(current.github_url.as_deref(), &edited.github_url),
            linkedin_url: changed(current.linkedin_url.as_deref(), &edited.linkedin_url),
            portfolio_url: changed(current.portfolio_url.as_deref(), &edited.portfolio_url),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Successful response of the login and register endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}
