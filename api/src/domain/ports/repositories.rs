//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{DomainBlock, DomainBlockId, NewDomainBlock};
use crate::error::DomainError;

/// Repository for DomainBlock entities
///
/// Domains passed in and returned are always normalized; the repository
/// never normalizes on its own.
#[async_trait]
pub trait DomainBlockRepository: Send + Sync {
    /// Every blocked domain, used to hydrate the blocklist cache
    async fn fetch_all_blocked_domains(&self) -> Result<Vec<String>, DomainError>;

    /// Insert a new block. Fails with `Conflict` if the domain is already blocked.
    async fn insert(&self, block: &NewDomainBlock) -> Result<DomainBlock, DomainError>;

    /// Persist all fields of an existing block, matched by ID
    async fn update(&self, block: &DomainBlock) -> Result<DomainBlock, DomainError>;

    /// Delete blocks for a domain, returning how many rows were removed
    async fn delete_by_domain(&self, domain: &str) -> Result<u64, DomainError>;

    /// Find a block by its domain
    async fn find_by_domain(&self, domain: &str) -> Result<Option<DomainBlock>, DomainError>;

    /// Find a block by ID
    async fn find_by_id(&self, id: &DomainBlockId) -> Result<Option<DomainBlock>, DomainError>;

    /// All blocks, ordered by domain
    async fn list_all(&self) -> Result<Vec<DomainBlock>, DomainError>;
}
