//! Request DTOs for API endpoints
//!
//! Length limits are checked here on the raw input; the services sanitize
//! afterwards and reject anything that is empty once tags are stripped.

use serde::Deserialize;
use validator::Validate;

/// Join the room
///
/// The 64 character bound counts markup too, so `<b>name</b>` spends seven
/// characters of it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JoinRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,
}

/// Send a message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 64, message = "Recipient must be 1-64 characters"))]
    pub to: String,

    #[validate(length(min = 1, max = 2000, message = "Text must be 1-2000 characters"))]
    pub text: String,

    /// `message` or `private_message`
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub kind: String,
}

/// Replace the fields of an owned message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EditMessageRequest {
    #[validate(length(min = 1, max = 64, message = "Recipient must be 1-64 characters"))]
    pub to: String,

    #[validate(length(min = 1, max = 2000, message = "Text must be 1-2000 characters"))]
    pub text: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub kind: String,
}

/// Query string of `GET /messages`
///
/// `limit` stays a string so a malformed value surfaces as a domain
/// validation error instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadMessagesQuery {
    pub limit: Option<String>,
}
