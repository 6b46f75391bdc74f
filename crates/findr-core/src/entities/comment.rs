//! Comment entity - a reply attached to a status post

use chrono::{DateTime, Utc};

use crate::value_objects::DocumentId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: DocumentId,
    /// Owning status post; not checked for existence on write
    pub status_id: DocumentId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(id: DocumentId, status_id: DocumentId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status_id,
            text,
            created_at,
        }
    }

    #[inline]
    pub fn belongs_to(&self, status_id: DocumentId) -> bool {
        self.status_id == status_id
    }
}
