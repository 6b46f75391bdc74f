//! Integration test utilities for the Findr client
//!
//! This crate provides helpers for running end-to-end tests against the
//! in-memory document store and identity provider.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
