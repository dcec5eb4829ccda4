use crate::utils::error::Result;
use crate::utils::validation::validate_domain;
use serde::{Deserialize, Serialize};

/// A domain name to look up, with the parts derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTarget {
    name: String,
}

impl DomainTarget {
    pub fn parse(name: &str) -> Result<Self> {
        validate_domain(name)?;
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Everything after the last `.`, case preserved. A name without a dot is its own TLD.
    pub fn tld(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    /// Lowercased first character, used only to shard the entry tree.
    pub fn shard(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_lowercase().collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for DomainTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsVerification {
    Strict,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdapRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub tls: TlsVerification,
}

impl RdapRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            tls: TlsVerification::Strict,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Same request with certificate verification turned off.
    pub fn insecure(&self) -> Self {
        Self {
            tls: TlsVerification::Disabled,
            ..self.clone()
        }
    }
}

/// An RDAP link object. Only `rel` and `href` are read; both may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

impl Link {
    /// Reads the `links` array of an RDAP object. Entries that are not
    /// objects are kept as empty links so positions stay stable.
    pub fn from_response(response: &serde_json::Value) -> Vec<Link> {
        response
            .get("links")
            .and_then(|v| v.as_array())
            .map(|links| {
                links
                    .iter()
                    .map(|link| Link::deserialize(link).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }
}
