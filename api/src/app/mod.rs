//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the blocklist cache.

pub mod admin_token;
pub mod domain_block_cache;
pub mod domain_block_service;

pub use admin_token::{hash_admin_token, verify_admin_token};
pub use domain_block_service::DomainBlockService;
