//! Server-side field validation for submission payloads.
//!
//! # Responsibilities
//! - Re-validate every field independently of the browser form
//! - Trim, bound, and normalize values before anything is persisted
//! - Fail on the first violated gate with a field-specific message
//!
//! # Design Decisions
//! - Validation is pure and completes fully in memory; the store is
//!   never touched on a failing payload
//! - Lengths are counted in characters, not bytes

use serde::Deserialize;
use thiserror::Error;

use crate::submission::model::NewSubmission;

/// Field length limits.
pub const MAX_TEXT_LENGTH: usize = 500;
pub const MAX_TEXTAREA_LENGTH: usize = 3000;
pub const MAX_EMAIL_LENGTH: usize = 255;
pub const MAX_PHONE_LENGTH: usize = 20;
pub const MAX_FILE_URLS: usize = 5;
pub const MAX_FILE_URL_LENGTH: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{0} must be {1} characters or less")]
    TooLong(&'static str, usize),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone format")]
    InvalidPhone,

    #[error("Maximum {MAX_FILE_URLS} files allowed")]
    TooManyFiles,

    #[error("Invalid file URL")]
    InvalidFileUrl,
}

/// Raw submission body as received from the client. Every field is
/// optional here; the gates below decide what is actually required.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionPayload {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub project_title: Option<String>,
    pub current_scenario: Option<String>,
    pub solution_applied: Option<String>,
    pub results_obtained: Option<String>,
    pub main_learning: Option<String>,
    pub what_would_change: Option<String>,
    #[serde(default)]
    pub file_urls: Vec<String>,
}

impl SubmissionPayload {
    /// Run every gate and produce a normalized record, or the first
    /// field-specific violation.
    pub fn validate(self) -> Result<NewSubmission, ValidationError> {
        Ok(NewSubmission {
            name: required_text(self.name, MAX_TEXT_LENGTH, "Name")?,
            job_title: required_text(self.job_title, MAX_TEXT_LENGTH, "Job title")?,
            company: required_text(self.company, MAX_TEXT_LENGTH, "Company")?,
            email: email(self.email)?,
            phone: phone(self.phone)?,
            project_title: required_text(self.project_title, MAX_TEXT_LENGTH, "Project title")?,
            current_scenario: required_text(
                self.current_scenario,
                MAX_TEXTAREA_LENGTH,
                "Current scenario",
            )?,
            solution_applied: required_text(
                self.solution_applied,
                MAX_TEXTAREA_LENGTH,
                "Solution applied",
            )?,
            results_obtained: required_text(
                self.results_obtained,
                MAX_TEXTAREA_LENGTH,
                "Results obtained",
            )?,
            main_learning: required_text(self.main_learning, MAX_TEXTAREA_LENGTH, "Main learning")?,
            what_would_change: optional_text(
                self.what_would_change,
                MAX_TEXTAREA_LENGTH,
                "What would change",
            )?,
            file_urls: file_urls(self.file_urls)?,
        })
    }
}

fn required_text(
    value: Option<String>,
    max_length: usize,
    field: &'static str,
) -> Result<String, ValidationError> {
    let trimmed = value.as_deref().unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    if trimmed.chars().count() > max_length {
        return Err(ValidationError::TooLong(field, max_length));
    }
    Ok(trimmed.to_string())
}

fn optional_text(
    value: Option<String>,
    max_length: usize,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    let trimmed = match value.as_deref().map(str::trim) {
        None | Some("") => return Ok(None),
        Some(t) => t,
    };
    if trimmed.chars().count() > max_length {
        return Err(ValidationError::TooLong(field, max_length));
    }
    Ok(Some(trimmed.to_string()))
}

fn email(value: Option<String>) -> Result<String, ValidationError> {
    let email = required_text(value, MAX_EMAIL_LENGTH, "Email")?;
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email.to_lowercase())
}

/// `local@domain.tld` shape: exactly one `@`, no whitespace, and a dot
/// with text on both sides in the domain part.
fn is_valid_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = s.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn phone(value: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(phone) = optional_text(value, MAX_PHONE_LENGTH, "Phone")? else {
        return Ok(None);
    };
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '+' | '(' | ')'));
    if !allowed {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(Some(phone))
}

/// Cap the list at five entries, drop blanks, and bound each path.
fn file_urls(value: Vec<String>) -> Result<Vec<String>, ValidationError> {
    if value.len() > MAX_FILE_URLS {
        return Err(ValidationError::TooManyFiles);
    }
    let mut urls = Vec::with_capacity(value.len());
    for url in &value {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            continue;
        }
        if url.chars().count() > MAX_FILE_URL_LENGTH {
            return Err(ValidationError::InvalidFileUrl);
        }
        urls.push(trimmed.to_string());
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> SubmissionPayload {
        SubmissionPayload {
            name: Some("Maria Silva".into()),
            job_title: Some("Safety Engineer".into()),
            company: Some("Acme Mining".into()),
            email: Some("Maria.Silva@Example.COM".into()),
            phone: Some("+55 (11) 99999-0000".into()),
            project_title: Some("Zero-incident turnaround".into()),
            current_scenario: Some("High incident rate".into()),
            solution_applied: Some("New lockout procedure".into()),
            results_obtained: Some("Incidents down 80%".into()),
            main_learning: Some("Training cadence matters".into()),
            what_would_change: None,
            file_urls: vec!["submissions/123-abc.pdf".into()],
        }
    }

    #[test]
    fn accepts_and_normalizes_full_payload() {
        let record = full_payload().validate().unwrap();
        assert_eq!(record.email, "maria.silva@example.com");
        assert_eq!(record.file_urls, vec!["submissions/123-abc.pdf"]);
        assert!(record.what_would_change.is_none());
    }

    #[test]
    fn rejects_missing_required_field() {
        let mut payload = full_payload();
        payload.company = None;
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::Required("Company")
        );
    }

    #[test]
    fn rejects_whitespace_only_required_field() {
        let mut payload = full_payload();
        payload.name = Some("   \t ".into());
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::Required("Name")
        );
    }

    #[test]
    fn rejects_over_length_field() {
        let mut payload = full_payload();
        payload.project_title = Some("x".repeat(MAX_TEXT_LENGTH + 1));
        assert_eq!(
            payload.validate().unwrap_err(),
            ValidationError::TooLong("Project title", MAX_TEXT_LENGTH)
        );
    }

    #[test]
    fn boundary_length_is_accepted() {
        let mut payload = full_payload();
        payload.main_learning = Some("y".repeat(MAX_TEXTAREA_LENGTH));
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn email_shapes() {
        for bad in ["plain", "a@b", "a@b.", "@b.com", "a b@c.com", "a@b c.com", "a@@b.com"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
        for good in ["a@b.co", "first.last@sub.domain.org", "x+y@z.io"] {
            assert!(is_valid_email(good), "{good} should pass");
        }
    }

    #[test]
    fn phone_charset() {
        let mut payload = full_payload();
        payload.phone = Some("call me maybe".into());
        assert_eq!(payload.validate().unwrap_err(), ValidationError::InvalidPhone);

        let mut payload = full_payload();
        payload.phone = Some("".into());
        assert!(payload.validate().unwrap().phone.is_none());
    }

    #[test]
    fn file_list_gates() {
        let mut payload = full_payload();
        payload.file_urls = vec!["a".into(); MAX_FILE_URLS + 1];
        assert_eq!(payload.validate().unwrap_err(), ValidationError::TooManyFiles);

        let mut payload = full_payload();
        payload.file_urls = vec!["  ".into(), "submissions/keep.png".into()];
        assert_eq!(
            payload.validate().unwrap().file_urls,
            vec!["submissions/keep.png"]
        );

        let mut payload = full_payload();
        payload.file_urls = vec!["p".repeat(MAX_FILE_URL_LENGTH + 1)];
        assert_eq!(payload.validate().unwrap_err(), ValidationError::InvalidFileUrl);
    }

    #[test]
    fn optional_narrative_is_trimmed() {
        let mut payload = full_payload();
        payload.what_would_change = Some("  earlier buy-in  ".into());
        assert_eq!(
            payload.validate().unwrap().what_would_change.as_deref(),
            Some("earlier buy-in")
        );
    }
}
