//! Status document model

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use findr_core::{NonEmptyText, ReactionKind};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::document::Writes;

/// Field names of a status document
pub mod fields {
    pub const TEXT: &str = "text";
    pub const REACTIONS: &str = "reactions";
    pub const COMMENTS_COUNT: &str = "commentsCount";
    pub const CREATED_AT: &str = "createdAt";
    pub const UPDATED_AT: &str = "updatedAt";
}

/// Stored shape of a status post
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusModel {
    pub text: String,
    #[serde(default)]
    pub reactions: BTreeMap<String, i64>,
    #[serde(default)]
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl StatusModel {
    /// Writes for a new post: empty reactions, zero comments, server time
    pub fn create_writes(text: &NonEmptyText) -> Writes {
        Writes::new()
            .set(fields::TEXT, text.as_str())
            .set(fields::REACTIONS, Value::Object(Map::new()))
            .set(fields::COMMENTS_COUNT, 0)
            .server_timestamp(fields::CREATED_AT)
    }

    pub fn edit_writes(text: &NonEmptyText) -> Writes {
        Writes::new()
            .set(fields::TEXT, text.as_str())
            .server_timestamp(fields::UPDATED_AT)
    }

    pub fn react_writes(kind: ReactionKind) -> Writes {
        Writes::new().increment(format!("{}.{}", fields::REACTIONS, kind.key()), 1)
    }

    pub fn comment_count_writes() -> Writes {
        Writes::new().increment(fields::COMMENTS_COUNT, 1)
    }
}
