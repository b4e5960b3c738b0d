//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod domain_block;

pub use domain_block::{DomainBlock, DomainBlockId, DomainBlockUpdate, NewDomainBlock};
