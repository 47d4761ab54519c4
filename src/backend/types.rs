//! Wire types exchanged with the admin backend

use crate::state::{Country, FieldErrors};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Props delivered when visiting the create page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateProvinceProps {
    #[serde(default)]
    pub countries: Vec<Country>,
}

/// Result of a store request that reached the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored; the backend points somewhere else (None: no location given)
    Redirect { location: Option<String> },
    /// Rejected with field-level messages
    Invalid(FieldErrors),
}

/// A field's messages: a bare string or a list of which only the first shows
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorMessages {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessages {
    fn into_first(self) -> Option<String> {
        match self {
            Self::One(message) => Some(message),
            Self::Many(messages) => messages.into_iter().next(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValidationErrorBody {
    #[serde(default)]
    errors: std::collections::HashMap<String, ErrorMessages>,
}

#[derive(Debug, Deserialize)]
struct RedirectBody {
    redirect: Option<String>,
}

/// Decode a validation failure body into field errors
pub(crate) fn decode_validation_errors(body: &str) -> Result<FieldErrors, BackendError> {
    let parsed: ValidationErrorBody = serde_json::from_str(body)?;
    Ok(parsed
        .errors
        .into_iter()
        .filter_map(|(field, messages)| messages.into_first().map(|m| (field, m)))
        .collect())
}

/// Redirect target carried in a JSON success body, if any
pub(crate) fn redirect_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<RedirectBody>(body)
        .ok()
        .and_then(|b| b.redirect)
        .filter(|r| !r.is_empty())
}
