//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::Utc;

use crate::domain::entities::{DomainBlock, DomainBlockId, NewDomainBlock};
use crate::domain::normalize::LocalDomains;

/// Account domain used by test services
pub const TEST_ACCOUNT_DOMAIN: &str = "example.org";

/// Host used by test services
pub const TEST_HOST: &str = "fedi.example.org";

/// Local domains for a test instance
pub fn test_local_domains() -> LocalDomains {
    LocalDomains::new(TEST_ACCOUNT_DOMAIN, TEST_HOST).unwrap()
}

/// Create payload for a domain with no comments
pub fn new_block(domain: &str) -> NewDomainBlock {
    NewDomainBlock {
        domain: domain.to_string(),
        ..Default::default()
    }
}

/// A stored block for an already normalized domain
pub fn test_block(domain: &str) -> DomainBlock {
    let now = Utc::now();
    DomainBlock {
        id: DomainBlockId::new(),
        domain: domain.to_string(),
        obfuscate: false,
        public_comment: None,
        private_comment: None,
        created_at: now,
        updated_at: now,
    }
}
