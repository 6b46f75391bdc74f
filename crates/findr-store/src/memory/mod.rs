//! In-process document store

mod clock;
mod store;

pub use clock::ServerClock;
pub use store::MemoryDocumentStore;
