//! Comment document model

use chrono::{DateTime, Utc};
use findr_core::{DocumentId, NonEmptyText};
use serde::Deserialize;

use crate::document::Writes;

/// Field names of a comment document
pub mod fields {
    pub const STATUS_ID: &str = "statusId";
    pub const TEXT: &str = "text";
    pub const CREATED_AT: &str = "createdAt";
}

/// Stored shape of a comment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentModel {
    pub status_id: DocumentId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl CommentModel {
    pub fn create_writes(status_id: DocumentId, text: &NonEmptyText) -> Writes {
        Writes::new()
            .set(fields::STATUS_ID, status_id.to_string())
            .set(fields::TEXT, text.as_str())
            .server_timestamp(fields::CREATED_AT)
    }
}
