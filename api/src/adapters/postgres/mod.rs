//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod domain_block_repo;


pub use domain_block_repo::PostgresDomainBlockRepository;
