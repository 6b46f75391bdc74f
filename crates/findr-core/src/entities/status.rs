//! Status post entity - a short journal entry in the feed

use chrono::{DateTime, Utc};

use super::reaction::{ReactionKind, Reactions};
use crate::value_objects::DocumentId;

/// Status post as delivered by the feed query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPost {
    pub id: DocumentId,
    pub text: String,
    pub reactions: Reactions,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StatusPost {
    /// Build a freshly created post: no reactions, no comments
    pub fn new(id: DocumentId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            reactions: Reactions::new(),
            comments_count: 0,
            created_at,
            updated_at: None,
        }
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at.is_some()
    }

    #[inline]
    pub fn reaction_count(&self, kind: ReactionKind) -> i64 {
        self.reactions.count(kind)
    }
}
