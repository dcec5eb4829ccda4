#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{RdapError, Result};
use crate::utils::validation::{validate_path, validate_url, Validate};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "VerbumMalum";
pub const DEFAULT_BOOTSTRAP_URL: &str = "https://data.iana.org/rdap/dns.json";
pub const DEFAULT_ENTRIES_DIR: &str = "entries";
pub const CACHE_FILE_NAME: &str = "dns.json";
pub const DEFAULT_MAX_CACHE_AGE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

pub fn default_user_agent() -> String {
    format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION"))
}

/// Runtime settings, built once in `main` and handed to each component.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub user_agent: String,
    pub bootstrap_url: String,
    pub cache_file: PathBuf,
    pub max_cache_age: Duration,
    pub entries_dir: PathBuf,
}

impl AppConfig {
    pub fn new(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            user_agent: default_user_agent(),
            bootstrap_url: DEFAULT_BOOTSTRAP_URL.to_string(),
            cache_file: cache_file.into(),
            max_cache_age: DEFAULT_MAX_CACHE_AGE,
            entries_dir: PathBuf::from(DEFAULT_ENTRIES_DIR),
        }
    }

    /// Defaults with the cache file placed in the platform state directory.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(cache_dir()?.join(CACHE_FILE_NAME)))
    }

    pub fn with_bootstrap_url(mut self, url: impl Into<String>) -> Self {
        self.bootstrap_url = url.into();
        self
    }

    pub fn with_entries_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.entries_dir = dir.into();
        self
    }

    pub fn with_max_cache_age(mut self, age: Duration) -> Self {
        self.max_cache_age = age;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("bootstrap_url", &self.bootstrap_url)?;
        validate_path("cache_file", &self.cache_file.to_string_lossy())?;
        validate_path("entries_dir", &self.entries_dir.to_string_lossy())?;
        Ok(())
    }
}

/// Application cache directory for the running OS.
pub fn cache_dir() -> Result<PathBuf> {
    cache_dir_for(
        std::env::consts::OS,
        |key| std::env::var(key).ok(),
        dirs::home_dir(),
    )
}

/// Linux: `$XDG_STATE_HOME/VerbumMalum` (default `~/.local/state`).
/// Windows: `%LOCALAPPDATA%\Temp\VerbumMalum` (default `~/AppData/Local`).
/// Empty variables count as unset.
pub fn cache_dir_for<F>(os: &str, env: F, home: Option<PathBuf>) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str, default: &str| {
        env(key)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    match os {
        "linux" => {
            let root = expand_home(&lookup("XDG_STATE_HOME", "~/.local/state"), home.as_deref())?;
            Ok(root.join(APP_NAME))
        }
        "windows" => {
            let root = expand_home(&lookup("LOCALAPPDATA", "~/AppData/Local"), home.as_deref())?;
            Ok(root.join("Temp").join(APP_NAME))
        }
        other => Err(RdapError::UnsupportedPlatform {
            os: other.to_string(),
        }),
    }
}

fn expand_home(path: &str, home: Option<&Path>) -> Result<PathBuf> {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\"))
    };

    match rest {
        Some(rest) => {
            let home = home.ok_or(RdapError::HomeDirectoryNotFound)?;
            Ok(if rest.is_empty() {
                home.to_path_buf()
            } else {
                home.join(rest)
            })
        }
        None => Ok(PathBuf::from(path)),
    }
}
