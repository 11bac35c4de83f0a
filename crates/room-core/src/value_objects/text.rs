//! Free-text handling shared by names, recipients and message bodies

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::error::DomainError;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("HTML tag pattern is valid"));

/// Strip HTML tags and surrounding whitespace
pub fn sanitize(raw: &str) -> String {
    HTML_TAG.replace_all(raw, "").trim().to_string()
}

/// Sanitize `raw` and reject it if nothing is left
pub fn require_text(field: &str, raw: &str) -> Result<String, DomainError> {
    let clean = sanitize(raw);
    if clean.is_empty() {
        return Err(DomainError::ValidationError(format!(
            "{field} must not be empty"
        )));
    }
    Ok(clean)
}

/// Human-readable `HH:MM:SS` label stored with each message
pub fn time_label(at: DateTime<Utc>) -> String {
    at.format("%H:%M:%S").to_string()
}
