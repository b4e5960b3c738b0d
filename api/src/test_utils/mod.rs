//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory repository counts hydration fetches and can be told to fail
//! or to stall, which is what the cache tests need to observe.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
