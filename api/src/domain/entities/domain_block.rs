//! Domain block entity
//!
//! A remote domain this instance refuses to federate with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a domain block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainBlockId(pub Uuid);

impl DomainBlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DomainBlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DomainBlockId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for DomainBlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted domain block
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainBlock {
    pub id: DomainBlockId,
    /// Normalized (punycode, lowercase) domain
    pub domain: String,
    /// Hide the domain when the blocklist is shown publicly
    pub obfuscate: bool,
    pub public_comment: Option<String>,
    /// Only visible to admins
    pub private_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DomainBlock {
    /// Domain as it may be shown to the public.
    ///
    /// With `obfuscate` set, everything but the outer quarters of the string
    /// and the dots is masked, e.g. `example.org` becomes `exa****.*rg`.
    pub fn public_domain(&self) -> String {
        if !self.obfuscate {
            return self.domain.clone();
        }

        let length = self.domain.chars().count();
        let visible = length / 4;
        self.domain
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if i > visible && i < length - visible && c != '.' {
                    '*'
                } else {
                    c
                }
            })
            .collect()
    }
}

/// Data needed to create a new domain block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDomainBlock {
    pub domain: String,
    #[serde(default)]
    pub obfuscate: bool,
    #[serde(default)]
    pub public_comment: Option<String>,
    #[serde(default)]
    pub private_comment: Option<String>,
}

/// Partial update of a domain block. Unset fields are left untouched;
/// an empty comment clears that comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainBlockUpdate {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub obfuscate: Option<bool>,
    #[serde(default)]
    pub public_comment: Option<String>,
    #[serde(default)]
    pub private_comment: Option<String>,
}

impl DomainBlockUpdate {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.domain.is_none()
            && self.obfuscate.is_none()
            && self.public_comment.is_none()
            && self.private_comment.is_none()
    }
}

/// Treat blank comments as "no comment"
pub fn non_blank(comment: Option<String>) -> Option<String> {
    comment.filter(|c| !c.trim().is_empty())
}
