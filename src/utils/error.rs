use thiserror::Error;

#[derive(Error, Debug)]
pub enum RdapError {
    #[error("Unsupported platform: {os}")]
    UnsupportedPlatform { os: String },

    #[error("No RDAP server found for TLD \"{tld}\"")]
    NoRdapServer { tld: String },

    #[error("HTTP {status} from {url}: {body}")]
    Http { url: String, status: u16, body: String },

    /// TLS / certificate negotiation failed before any response was received.
    #[error("TLS negotiation with {url} failed: {message}")]
    Tls { url: String, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid domain \"{domain}\": {reason}")]
    InvalidDomain { domain: String, reason: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Home directory could not be determined")]
    HomeDirectoryNotFound,
}

impl RdapError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            RdapError::UnsupportedPlatform { os } => {
                format!("This tool does not know where to cache data on {}", os)
            }
            RdapError::NoRdapServer { tld } => {
                format!("IANA lists no RDAP server for .{}", tld)
            }
            RdapError::Http { url, status, .. } => {
                format!("Request to {} was answered with HTTP {}", url, status)
            }
            RdapError::Tls { url, .. } => format!("Could not establish TLS with {}", url),
            RdapError::Transport(e) => format!("Network request failed: {}", e),
            RdapError::InvalidDomain { domain, reason } => {
                format!("\"{}\" is not a usable domain: {}", domain, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RdapError::UnsupportedPlatform { .. } => "Run on Linux or Windows",
            RdapError::NoRdapServer { .. } => {
                "Check the domain's TLD; delete the cached dns.json to force a refresh"
            }
            RdapError::Http { status, .. } if *status == 404 => {
                "The registry has no record of this domain"
            }
            RdapError::Http { status, .. } if *status == 429 => {
                "The server is rate limiting requests, try again later"
            }
            RdapError::Http { .. } => "Inspect the response body above for details",
            RdapError::Tls { .. } | RdapError::Transport(_) => {
                "Check network connectivity and try again"
            }
            RdapError::Io(_) => "Check permissions of the cache and entries directories",
            RdapError::Serialization(_) => {
                "The server returned malformed JSON; delete the cached dns.json if it is corrupt"
            }
            RdapError::InvalidDomain { .. } => "Pass a bare domain name such as example.com",
            RdapError::InvalidConfigValue { .. } | RdapError::HomeDirectoryNotFound => {
                "Check the command line arguments and environment"
            }
            RdapError::Csv(_) => "Check that stdout is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, RdapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_keeps_status_and_body() {
        let err = RdapError::Http {
            url: "https://rdap.example.test/domain/a.test".to_string(),
            status: 404,
            body: "{\"errorCode\":404}".to_string(),
        };

        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("errorCode"));
        assert_eq!(
            err.recovery_suggestion(),
            "The registry has no record of this domain"
        );
    }

    #[test]
    fn test_no_rdap_server_message() {
        let err = RdapError::NoRdapServer {
            tld: "invalid".to_string(),
        };
        assert_eq!(err.to_string(), "No RDAP server found for TLD \"invalid\"");
        assert!(err.user_friendly_message().contains(".invalid"));
    }
}
