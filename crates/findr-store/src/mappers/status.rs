//! Status document -> StatusPost entity mapper

use findr_core::{DocumentId, RepoResult, Reactions, StatusPost};

use crate::document::Document;
use crate::models::{decode, StatusModel};

impl StatusModel {
    pub fn into_entity(self, id: DocumentId) -> StatusPost {
        StatusPost {
            id,
            text: self.text,
            reactions: Reactions::from(self.reactions),
            comments_count: self.comments_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Convert a stored status document into a StatusPost
pub fn status_from_document(collection: &str, doc: &Document) -> RepoResult<StatusPost> {
    decode::<StatusModel>(collection, doc).map(|model| model.into_entity(doc.id))
}
