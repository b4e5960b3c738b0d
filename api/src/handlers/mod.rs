//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod domain_blocks;

pub use domain_blocks::{
    check_domain_block, check_domain_blocks, create_domain_block, delete_domain_block,
    get_domain_block, get_domain_block_by_domain, list_domain_blocks, list_public_domain_blocks,
    update_domain_block,
};
