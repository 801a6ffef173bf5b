//! Submission record types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review status of a submission. Closed set; new records always start
/// as `Pending` and only reviewers move them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::UnderReview => "under_review",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubmissionStatus::Pending),
            "under_review" => Ok(SubmissionStatus::UnderReview),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// A fully validated, normalized submission ready to persist.
///
/// Every field has already passed the gates in [`crate::submission::validate`]:
/// required fields are trimmed and non-empty, the email is lower-cased,
/// and the file list is capped and blank-free.
#[derive(Debug, Clone, Serialize)]
pub struct NewSubmission {
    pub name: String,
    pub job_title: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub project_title: String,
    pub current_scenario: String,
    pub solution_applied: String,
    pub results_obtained: String,
    pub main_learning: String,
    pub what_would_change: Option<String>,
    pub file_urls: Vec<String>,
}

/// A persisted submission as the review surface sees it.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    pub id: Uuid,
    pub status: SubmissionStatus,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: u64,
    #[serde(flatten)]
    pub fields: NewSubmission,
}
