//! Proxy contact: a recruiter writes to a candidate without either side
//! seeing the other's address. Sending is simulated; nothing leaves the
//! process.

use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::candidate::Candidate;

pub const FIELDS_REQUIRED: &str = "Please fill in all required fields";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactRequest {
    #[serde(default)]
    pub recruiter_name: String,
    #[serde(default)]
    pub recruiter_email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub candidate_id: String,
    pub candidate_name: String,
    pub recruiter_name: String,
    pub company: Option<String>,
    pub message: String,
    pub sent_at: DateTime<Utc>,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_contact(request: &ContactRequest) -> Result<(), String> {
    if request.recruiter_name.trim().is_empty()
        || request.recruiter_email.trim().is_empty()
        || request.message.trim().is_empty()
    {
        return Err(FIELDS_REQUIRED.to_string());
    }
    if !is_valid_email(&request.recruiter_email) {
        return Err(INVALID_EMAIL.to_string());
    }
    Ok(())
}

/// Waits out `delay` to mimic delivery, then hands back a receipt.
pub async fn simulate_send(
    candidate: &Candidate,
    request: &ContactRequest,
    delay: Duration,
) -> ContactReceipt {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let company = request
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    info!(
        candidate_id = %candidate.id,
        recruiter = %request.recruiter_name.trim(),
        "Simulated contact message delivered"
    );

    ContactReceipt {
        candidate_id: candidate.id.clone(),
        candidate_name: candidate.name.clone(),
        recruiter_name: request.recruiter_name.trim().to_string(),
        company,
        message: format!("Your message to {} has been sent!", candidate.name),
        sent_at: Utc::now(),
    }
}
