//! # findr-store
//!
//! Backend layer implementing the ports defined in `findr-core`.
//!
//! ## Overview
//!
//! The hosted backend the client talks to is reproduced in-process:
//!
//! - A document store ([`MemoryDocumentStore`]) with collections, dotted-path
//!   field writes, server timestamps, atomic increments and live queries
//! - Document models (serde shapes of the stored fields) and model ↔ entity
//!   mappers
//! - Repository implementations for status posts and comments
//! - An email/password identity provider with a session listener
//! - A media library with a scripted image picker
//!
//! ## Usage
//!
//! ```rust,ignore
//! use findr_store::{MemoryDocumentStore, StoreStatusRepository};
//! use findr_core::traits::StatusRepository;
//!
//! let store = MemoryDocumentStore::new(0);
//! let statuses = StoreStatusRepository::new(store.clone(), "statuses");
//! let mut feed = statuses.watch_feed();
//! ```

pub mod document;
pub mod identity;
pub mod mappers;
pub mod media;
pub mod memory;
pub mod models;
pub mod repositories;

// Re-export commonly used types
pub use document::{Direction, Document, FieldWrite, Filter, Query, Writes};
pub use identity::MemoryIdentityProvider;
pub use media::MemoryMediaLibrary;
pub use memory::MemoryDocumentStore;
pub use repositories::{StoreCommentRepository, StoreStatusRepository};
