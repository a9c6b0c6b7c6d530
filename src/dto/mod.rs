use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note text, 1 to 500 characters once trimmed
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteNoteResponse {
    /// ID of the removed note
    pub deleted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Flash message carried to the index page through the redirect target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlashQuery {
    /// `success` or `error`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}

impl FlashQuery {
    /// Builds the flash pair from raw query pairs, keeping the first value of
    /// each key so repeated keys never reject the page.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        };

        Self {
            kind: first("type"),
            message: first("message"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn flash_keeps_first_of_repeated_keys() {
        let query = FlashQuery::from_pairs(&pairs(&[
            ("type", "error"),
            ("message", "first"),
            ("type", "success"),
            ("message", "second"),
        ]));

        assert_eq!(query.kind.as_deref(), Some("error"));
        assert_eq!(query.message.as_deref(), Some("first"));
    }

    #[test]
    fn flash_ignores_unrelated_keys() {
        let query = FlashQuery::from_pairs(&pairs(&[("page", "2")]));

        assert!(query.kind.is_none());
        assert!(query.message.is_none());
    }
}
