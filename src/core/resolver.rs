use crate::utils::error::{RdapError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Wire shape of the IANA bootstrap file (RFC 9224).
#[derive(Debug, Deserialize)]
struct BootstrapDocument {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    publication: Option<String>,
    #[serde(default)]
    description: Option<String>,
    services: Vec<(Vec<String>, Vec<String>)>,
}

/// TLD → RDAP base URLs, built once from the bootstrap file.
///
/// TLDs are matched exactly as the file spells them (lowercase in the
/// IANA data); no case folding is applied to lookups.
#[derive(Debug, Clone, Default)]
pub struct BootstrapDirectory {
    servers: HashMap<String, Vec<String>>,
    publication: Option<String>,
}

impl BootstrapDirectory {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path)?;
        Self::from_slice(&content)
    }

    pub fn from_slice(content: &[u8]) -> Result<Self> {
        let document: BootstrapDocument = serde_json::from_slice(content)?;
        tracing::debug!(
            "Bootstrap file version {:?}, published {:?}: {}",
            document.version,
            document.publication,
            document.description.as_deref().unwrap_or("-")
        );

        let mut servers = HashMap::new();
        for (tlds, urls) in document.services {
            if urls.is_empty() {
                continue;
            }
            for tld in tlds {
                // 先宣告者優先
                servers.entry(tld).or_insert_with(|| urls.clone());
            }
        }

        tracing::debug!("Bootstrap directory covers {} TLDs", servers.len());
        Ok(Self {
            servers,
            publication: document.publication,
        })
    }

    /// First base URL listed for `tld`, without a trailing slash.
    pub fn resolve(&self, tld: &str) -> Result<String> {
        self.servers
            .get(tld)
            .and_then(|urls| urls.first())
            .map(|url| url.trim_end_matches('/').to_string())
            .ok_or_else(|| RdapError::NoRdapServer {
                tld: tld.to_string(),
            })
    }

    pub fn publication(&self) -> Option<&str> {
        self.publication.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> BootstrapDirectory {
        let document = serde_json::json!({
            "description": "RDAP bootstrap file for Domain Name System registrations",
            "publication": "2024-01-01T00:00:00Z",
            "version": "1.0",
            "services": [
                [["com", "net"], ["https://rdap.verisign.test/com/v1/"]],
                [["xyz"], ["https://rdap.centralnic.test/xyz/", "http://rdap.centralnic.test/xyz/"]],
                [["org"], ["https://rdap.pir.test"]],
                [["com"], ["https://duplicate.test/"]],
                [["empty"], []],
                [["empty"], ["https://second.test//"]]
            ]
        });
        BootstrapDirectory::from_slice(document.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_resolve_returns_first_url_without_trailing_slash() {
        let dir = directory();
        assert_eq!(dir.resolve("com").unwrap(), "https://rdap.verisign.test/com/v1");
        assert_eq!(dir.resolve("net").unwrap(), "https://rdap.verisign.test/com/v1");
        assert_eq!(dir.resolve("xyz").unwrap(), "https://rdap.centralnic.test/xyz");
        assert_eq!(dir.resolve("org").unwrap(), "https://rdap.pir.test");
    }

    #[test]
    fn test_first_declared_entry_wins() {
        let dir = directory();
        assert_ne!(dir.resolve("com").unwrap(), "https://duplicate.test");
        assert_eq!(dir.resolve("com").unwrap(), "https://rdap.verisign.test/com/v1");
    }

    #[test]
    fn test_entries_without_urls_are_skipped() {
        let dir = directory();
        assert_eq!(dir.resolve("empty").unwrap(), "https://second.test");
    }

    #[test]
    fn test_unknown_tld_fails() {
        let dir = directory();
        assert!(matches!(
            dir.resolve("invalid"),
            Err(RdapError::NoRdapServer { ref tld }) if tld == "invalid"
        ));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dir = directory();
        assert!(dir.resolve("COM").is_err());
    }

    #[test]
    fn test_publication_is_kept() {
        let dir = directory();
        assert_eq!(dir.publication(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_malformed_document_fails() {
        assert!(matches!(
            BootstrapDirectory::from_slice(b"{\"services\": 3}"),
            Err(RdapError::Serialization(_))
        ));
    }
}
