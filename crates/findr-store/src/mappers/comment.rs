//! Comment document -> Comment entity mapper

use findr_core::{Comment, RepoResult};

use crate::document::Document;
use crate::models::{decode, CommentModel};

/// Convert a stored comment document into a Comment
pub fn comment_from_document(collection: &str, doc: &Document) -> RepoResult<Comment> {
    let model: CommentModel = decode(collection, doc)?;
    Ok(Comment::new(doc.id, model.status_id, model.text, model.created_at))
}
