//! Document models - serde shapes of stored documents and the writes that
//! produce them

mod comment;
mod status;

pub use comment::{fields as comment_fields, CommentModel};
pub use status::{fields as status_fields, StatusModel};

use findr_core::{DomainError, RepoResult};
use serde::de::DeserializeOwned;

use crate::document::Document;

/// Deserialize a document's fields into a model
pub(crate) fn decode<T: DeserializeOwned>(collection: &str, doc: &Document) -> RepoResult<T> {
    serde_json::from_value(doc.to_value())
        .map_err(|e| DomainError::malformed(collection, doc.id, e.to_string()))
}
