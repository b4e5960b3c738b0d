//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::fixtures::test_block;
use crate::domain::entities::{DomainBlock, DomainBlockId, NewDomainBlock};
use crate::domain::ports::DomainBlockRepository;
use crate::error::DomainError;

// ============================================================================
// In-Memory Domain Block Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryDomainBlockRepository {
    blocks: Arc<RwLock<HashMap<DomainBlockId, DomainBlock>>>,
    fetches: AtomicUsize,
    fail_fetches: AtomicBool,
    fetch_delay: Option<Duration>,
}

impl InMemoryDomainBlockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a block for each (normalized) domain
    pub fn with_domains(self, domains: &[&str]) -> Self {
        {
            let mut blocks = self.blocks.write().unwrap();
            for domain in domains {
                let block = test_block(domain);
                blocks.insert(block.id, block);
            }
        }
        self
    }

    /// Stall every hydration fetch, widening the window for racing callers
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Make hydration fetches fail until switched off again
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Number of `fetch_all_blocked_domains` calls, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainBlockRepository for InMemoryDomainBlockRepository {
    async fn fetch_all_blocked_domains(&self) -> Result<Vec<String>, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(DomainError::Database("connection refused".to_string()));
        }

        let blocks = self.blocks.read().unwrap();
        Ok(blocks.values().map(|b| b.domain.clone()).collect())
    }

    async fn insert(&self, new_block: &NewDomainBlock) -> Result<DomainBlock, DomainError> {
        let mut blocks = self.blocks.write().unwrap();
        if blocks.values().any(|b| b.domain == new_block.domain) {
            return Err(DomainError::Conflict(format!(
                "Domain '{}' is already blocked",
                new_block.domain
            )));
        }

        let now = Utc::now();
        let block = DomainBlock {
            id: DomainBlockId::new(),
            domain: new_block.domain.clone(),
            obfuscate: new_block.obfuscate,
            public_comment: new_block.public_comment.clone(),
            private_comment: new_block.private_comment.clone(),
            created_at: now,
            updated_at: now,
        };
        blocks.insert(block.id, block.clone());

        Ok(block)
    }

    async fn update(&self, block: &DomainBlock) -> Result<DomainBlock, DomainError> {
        let mut blocks = self.blocks.write().unwrap();
        if blocks
            .values()
            .any(|b| b.id != block.id && b.domain == block.domain)
        {
            return Err(DomainError::Conflict(format!(
                "Domain '{}' is already blocked",
                block.domain
            )));
        }

        let stored = blocks
            .get_mut(&block.id)
            .ok_or_else(|| DomainError::NotFound(format!("Domain block {} not found", block.id)))?;
        stored.domain = block.domain.clone();
        stored.obfuscate = block.obfuscate;
        stored.public_comment = block.public_comment.clone();
        stored.private_comment = block.private_comment.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete_by_domain(&self, domain: &str) -> Result<u64, DomainError> {
        let mut blocks = self.blocks.write().unwrap();
        let before = blocks.len();
        blocks.retain(|_, b| b.domain != domain);
        Ok((before - blocks.len()) as u64)
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<DomainBlock>, DomainError> {
        let blocks = self.blocks.read().unwrap();
        Ok(blocks.values().find(|b| b.domain == domain).cloned())
    }

    async fn find_by_id(&self, id: &DomainBlockId) -> Result<Option<DomainBlock>, DomainError> {
        let blocks = self.blocks.read().unwrap();
        Ok(blocks.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<DomainBlock>, DomainError> {
        let blocks = self.blocks.read().unwrap();
        let mut sorted: Vec<_> = blocks.values().cloned().collect();
        sorted.sort_by(|a, b| a.domain.cmp(&b.domain));
        Ok(sorted)
    }
}
