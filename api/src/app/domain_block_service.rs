//! Domain block service
//!
//! Answers "is this domain blocked?" for federation code and applies admin
//! changes to the blocklist. Every domain is normalized before it reaches the
//! cache or the repository. Mutations write through the repository first and
//! clear the cache only after the write succeeded.

use std::sync::Arc;

use url::Url;

use super::domain_block_cache::DomainBlockCache;
use crate::domain::entities::domain_block::non_blank;
use crate::domain::entities::{DomainBlock, DomainBlockId, DomainBlockUpdate, NewDomainBlock};
use crate::domain::normalize::{normalize_domain, LocalDomains};
use crate::domain::ports::DomainBlockRepository;
use crate::error::DomainError;

/// Service for querying and managing domain blocks
pub struct DomainBlockService<R>
where
    R: DomainBlockRepository + ?Sized,
{
    blocks: Arc<R>,
    cache: DomainBlockCache,
    local: LocalDomains,
}

impl<R> DomainBlockService<R>
where
    R: DomainBlockRepository + ?Sized,
{
    pub fn new(blocks: Arc<R>, local: LocalDomains) -> Self {
        Self {
            blocks,
            cache: DomainBlockCache::new(),
            local,
        }
    }

    pub fn cache(&self) -> &DomainBlockCache {
        &self.cache
    }

    pub fn local_domains(&self) -> &LocalDomains {
        &self.local
    }

    // Queries

    /// Check whether a domain is blocked.
    ///
    /// The instance's own domains are never blocked and never hit the cache.
    pub async fn is_domain_blocked(&self, domain: &str) -> Result<bool, DomainError> {
        let domain = normalize_domain(domain)?;
        if self.local.is_local(&domain) {
            return Ok(false);
        }

        self.cache.is_blocked(&domain, self.blocks.as_ref()).await
    }

    /// True if any of the domains is blocked. Stops at the first block or
    /// the first error.
    pub async fn are_domains_blocked<S>(&self, domains: &[S]) -> Result<bool, DomainError>
    where
        S: AsRef<str>,
    {
        for domain in domains {
            if self.is_domain_blocked(domain.as_ref()).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Check whether the host of a URI is blocked. URIs without a host are
    /// treated like the empty domain.
    pub async fn is_uri_blocked(&self, uri: &Url) -> Result<bool, DomainError> {
        self.is_domain_blocked(uri.host_str().unwrap_or_default())
            .await
    }

    /// True if the host of any URI is blocked
    pub async fn are_uris_blocked(&self, uris: &[Url]) -> Result<bool, DomainError> {
        for uri in uris {
            if self.is_uri_blocked(uri).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Look up the block record for a domain
    pub async fn get_domain_block(&self, domain: &str) -> Result<DomainBlock, DomainError> {
        let domain = normalize_domain(domain)?;
        if self.local.is_local(&domain) {
            return Err(not_found_for_domain(&domain));
        }

        self.blocks
            .find_by_domain(&domain)
            .await?
            .ok_or_else(|| not_found_for_domain(&domain))
    }

    pub async fn get_domain_block_by_id(
        &self,
        id: &DomainBlockId,
    ) -> Result<DomainBlock, DomainError> {
        self.blocks
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Domain block {} not found", id)))
    }

    pub async fn list_domain_blocks(&self) -> Result<Vec<DomainBlock>, DomainError> {
        self.blocks.list_all().await
    }

    // Mutations

    /// Block a new domain
    pub async fn create_domain_block(
        &self,
        block: NewDomainBlock,
    ) -> Result<DomainBlock, DomainError> {
        let new_block = NewDomainBlock {
            domain: self.blockable_domain(&block.domain)?,
            obfuscate: block.obfuscate,
            public_comment: non_blank(block.public_comment),
            private_comment: non_blank(block.private_comment),
        };

        let created = self.blocks.insert(&new_block).await?;
        self.cache.clear().await;

        tracing::info!(id = %created.id, domain = %created.domain, "Domain block created");
        Ok(created)
    }

    /// Apply a partial update to an existing block
    pub async fn update_domain_block(
        &self,
        id: &DomainBlockId,
        update: DomainBlockUpdate,
    ) -> Result<DomainBlock, DomainError> {
        if update.is_empty() {
            return Err(DomainError::Validation("empty form submitted".to_string()));
        }

        let mut block = self.get_domain_block_by_id(id).await?;

        if let Some(domain) = update.domain {
            block.domain = self.blockable_domain(&domain)?;
        }
        if let Some(obfuscate) = update.obfuscate {
            block.obfuscate = obfuscate;
        }
        if let Some(comment) = update.public_comment {
            block.public_comment = non_blank(Some(comment));
        }
        if let Some(comment) = update.private_comment {
            block.private_comment = non_blank(Some(comment));
        }

        let updated = self.blocks.update(&block).await?;
        self.cache.clear().await;

        tracing::info!(id = %updated.id, domain = %updated.domain, "Domain block updated");
        Ok(updated)
    }

    /// Unblock a domain
    pub async fn delete_domain_block(&self, domain: &str) -> Result<(), DomainError> {
        let domain = normalize_domain(domain)?;

        let deleted = self.blocks.delete_by_domain(&domain).await?;
        if deleted == 0 {
            return Err(not_found_for_domain(&domain));
        }
        self.cache.clear().await;

        tracing::info!(domain = %domain, "Domain block deleted");
        Ok(())
    }

    /// Unblock the domain of the given block, returning the removed record
    pub async fn delete_domain_block_by_id(
        &self,
        id: &DomainBlockId,
    ) -> Result<DomainBlock, DomainError> {
        let block = self.get_domain_block_by_id(id).await?;
        self.delete_domain_block(&block.domain).await?;
        Ok(block)
    }

    /// Normalize a domain that is about to be stored as a block
    fn blockable_domain(&self, raw: &str) -> Result<String, DomainError> {
        let domain = normalize_domain(raw)?;
        if self.local.is_local(&domain) {
            return Err(DomainError::InvalidDomain(format!(
                "'{}' refers to this instance and cannot be blocked",
                raw
            )));
        }
        Ok(domain)
    }
}

fn not_found_for_domain(domain: &str) -> DomainError {
    DomainError::NotFound(format!("No block for domain '{}'", domain))
}
