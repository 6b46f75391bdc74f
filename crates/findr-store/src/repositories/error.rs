//! Error handling utilities for repositories

use findr_core::DomainError;
use tracing::warn;

use crate::document::Document;

/// Map every document, dropping (and logging) the ones that fail to decode
pub fn decode_all<T, F>(docs: &[Document], mut decode: F) -> Vec<T>
where
    F: FnMut(&Document) -> Result<T, DomainError>,
{
    docs.iter()
        .filter_map(|doc| match decode(doc) {
            Ok(entity) => Some(entity),
            Err(e) => {
                warn!(id = %doc.id, error = %e, "Skipping malformed document");
                None
            }
        })
        .collect()
}
