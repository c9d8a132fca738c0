use serde::{Deserialize, Serialize};

pub const STATUS_TO_SUBMIT: &str = "To Submit";
pub const STATUS_SUBMITTED: &str = "Submitted";
pub const STATUS_INTERVIEWING: &str = "Interviewing";
pub const STATUS_REJECTED: &str = "Rejected";
pub const STATUS_OFFER_RECEIVED: &str = "Offer Received";

fn default_status() -> String {
    STATUS_TO_SUBMIT.to_string()
}

/// An internship application as listed by `GET /api/applications`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub company_name: String,
    pub role_title: String,
    #[serde(default)]
    pub job_url: Option<String>,
    /// One of the `STATUS_*` values; kept as text so new server states still load
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub cv_id: Option<i64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub submission_date: Option<String>,
}

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationStats {
    pub total: usize,
    pub submitted: usize,
    pub interviewing: usize,
    pub offers: usize,
}

impl ApplicationStats {
    pub fn from_applications(applications: &[Application]) -> Self {
        let count = |status: &str| applications.iter().filter(|a| a.status == status).count();
        Self {
            total: applications.len(),
            submitted: count(STATUS_SUBMITTED),
            interviewing: count(STATUS_INTERVIEWING),
            offers: count(STATUS_OFFER_RECEIVED),
        }
    }
}
