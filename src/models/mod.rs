use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note ID
    pub id: String,
    /// Note text, trimmed
    pub text: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl Note {
    /// Builds a note with a fresh id stamped with the current time.
    /// `text` is expected to be validated already.
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            created_at: Utc::now(),
        }
    }
}
