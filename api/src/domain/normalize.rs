//! Domain normalization
//!
//! Every domain is stored, cached and compared in one canonical form:
//! IDNA ToASCII (punycode), lowercase, no trailing dot. IP literals are
//! kept in their canonical textual form.

use std::net::IpAddr;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::DomainError;

const MAX_DOMAIN_LENGTH: usize = 253;

fn label_pattern() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| {
        Regex::new(r"^[a-z0-9_]([a-z0-9_-]{0,61}[a-z0-9_])?$").expect("label pattern is valid")
    })
}

/// Normalize a domain or hostname.
///
/// Empty input normalizes to the empty string, which is what a URI without
/// a host yields. Anything that is not a valid hostname after IDNA mapping
/// is rejected with [`DomainError::InvalidDomain`].
pub fn normalize_domain(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let unbracketed = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    if let Ok(ip) = unbracketed.parse::<IpAddr>() {
        return Ok(ip.to_string());
    }

    let ascii = idna::domain_to_ascii(trimmed)
        .map_err(|e| DomainError::InvalidDomain(format!("{}: {:?}", trimmed, e)))?;
    let ascii = ascii.strip_suffix('.').unwrap_or(&ascii);

    if ascii.is_empty() || ascii.len() > MAX_DOMAIN_LENGTH {
        return Err(DomainError::InvalidDomain(trimmed.to_string()));
    }
    if !ascii.split('.').all(|label| label_pattern().is_match(label)) {
        return Err(DomainError::InvalidDomain(trimmed.to_string()));
    }

    Ok(ascii.to_string())
}

/// The instance's own domains, which can never be blocked
#[derive(Debug, Clone)]
pub struct LocalDomains {
    account_domain: String,
    host: String,
}

impl LocalDomains {
    /// Build from configured values, normalizing both
    pub fn new(account_domain: &str, host: &str) -> Result<Self, DomainError> {
        Ok(Self {
            account_domain: normalize_domain(account_domain)?,
            host: normalize_domain(host)?,
        })
    }

    /// Whether an already normalized domain refers to this instance
    pub fn is_local(&self, normalized: &str) -> bool {
        normalized.is_empty() || normalized == self.account_domain || normalized == self.host
    }

    pub fn account_domain(&self) -> &str {
        &self.account_domain
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_ascii_domains() {
        assert_eq!(normalize_domain("Evil.Example").unwrap(), "evil.example");
    }

    #[test]
    fn encodes_unicode_as_punycode() {
        assert_eq!(
            normalize_domain("bücher.example").unwrap(),
            "xn--bcher-kva.example"
        );
        assert_eq!(
            normalize_domain("BÜCHER.example").unwrap(),
            "xn--bcher-kva.example"
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["bücher.example", "Spam.Test.", "10.0.0.1", "[::1]", ""] {
            let once = normalize_domain(raw).unwrap();
            assert_eq!(normalize_domain(&once).unwrap(), once, "input {}", raw);
        }
    }

    #[test]
    fn strips_trailing_dot_and_whitespace() {
        assert_eq!(normalize_domain("  spam.test.  ").unwrap(), "spam.test");
    }

    #[test]
    fn empty_input_normalizes_to_empty() {
        assert_eq!(normalize_domain("").unwrap(), "");
        assert_eq!(normalize_domain("   ").unwrap(), "");
    }

    #[test]
    fn keeps_ip_literals() {
        assert_eq!(normalize_domain("192.168.0.1").unwrap(), "192.168.0.1");
        assert_eq!(normalize_domain("[::1]").unwrap(), "::1");
        assert_eq!(normalize_domain("::1").unwrap(), "::1");
    }

    #[test]
    fn rejects_malformed_domains() {
        for raw in [
            "has space.example",
            "double..dot",
            "-leading.example",
            "trailing-.example",
            "slash/example",
            "user@example.org",
            ".",
        ] {
            assert!(
                matches!(normalize_domain(raw), Err(DomainError::InvalidDomain(_))),
                "expected {} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn rejects_overlong_labels() {
        let label = "a".repeat(64);
        let domain = format!("{}.example", label);
        assert!(normalize_domain(&domain).is_err());

        let ok = format!("{}.example", "a".repeat(63));
        assert!(normalize_domain(&ok).is_ok());
    }

    #[test]
    fn local_domains_cover_empty_account_domain_and_host() {
        let local = LocalDomains::new("Example.org", "fedi.example.org").unwrap();

        assert!(local.is_local(""));
        assert!(local.is_local("example.org"));
        assert!(local.is_local("fedi.example.org"));
        assert!(!local.is_local("evil.example"));
        assert_eq!(local.account_domain(), "example.org");
        assert_eq!(local.host(), "fedi.example.org");
    }

    #[test]
    fn local_domains_reject_invalid_config() {
        assert!(LocalDomains::new("bad domain", "example.org").is_err());
    }
}
