//! Blocklist cache
//!
//! In-memory set of blocked domains, hydrated lazily from the repository and
//! dropped wholesale whenever a block is created, updated or deleted.
//!
//! States: empty (`None`) and populated (`Some`). Hydration and clearing both
//! run under the write lock, so at most one fetch is in flight and a clear can
//! never interleave with a half-finished populate. A failed fetch leaves the
//! cache empty and the next lookup retries.

use std::collections::HashSet;

use tokio::sync::RwLock;

use crate::domain::ports::DomainBlockRepository;
use crate::error::DomainError;

#[derive(Debug, Default)]
pub struct DomainBlockCache {
    domains: RwLock<Option<HashSet<String>>>,
}

impl DomainBlockCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check membership of an already normalized domain, hydrating from
    /// `repo` if the cache is empty.
    pub async fn is_blocked<R>(&self, domain: &str, repo: &R) -> Result<bool, DomainError>
    where
        R: DomainBlockRepository + ?Sized,
    {
        {
            let domains = self.domains.read().await;
            if let Some(set) = domains.as_ref() {
                return Ok(set.contains(domain));
            }
        }

        let mut domains = self.domains.write().await;
        // Another caller may have populated while we queued for the lock
        if domains.is_none() {
            Self::populate(&mut domains, repo).await?;
        }

        Ok(domains.as_ref().is_some_and(|set| set.contains(domain)))
    }

    /// Drop the cached set; the next lookup reloads from the repository
    pub async fn clear(&self) {
        *self.domains.write().await = None;
    }

    pub async fn is_populated(&self) -> bool {
        self.domains.read().await.is_some()
    }

    /// Number of cached domains, zero when empty
    pub async fn len(&self) -> usize {
        self.domains.read().await.as_ref().map_or(0, HashSet::len)
    }

    /// Must be called with the write lock held
    async fn populate<R>(
        slot: &mut Option<HashSet<String>>,
        repo: &R,
    ) -> Result<(), DomainError>
    where
        R: DomainBlockRepository + ?Sized,
    {
        let fetched = repo.fetch_all_blocked_domains().await?;
        let set: HashSet<String> = fetched.into_iter().collect();
        tracing::debug!(count = set.len(), "Hydrated domain block cache");
        *slot = Some(set);
        Ok(())
    }
}
