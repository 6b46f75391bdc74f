//! Identity provider implementations

mod memory;

pub use memory::MemoryIdentityProvider;
