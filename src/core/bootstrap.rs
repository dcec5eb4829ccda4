use crate::config::AppConfig;
use crate::domain::model::RdapRequest;
use crate::domain::ports::RdapTransport;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Keeps a local copy of the IANA RDAP bootstrap file for DNS.
#[derive(Debug, Clone)]
pub struct BootstrapCache {
    url: String,
    path: PathBuf,
    max_age: Duration,
}

impl BootstrapCache {
    pub fn new(url: impl Into<String>, path: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            max_age,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.bootstrap_url.clone(),
            config.cache_file.clone(),
            config.max_cache_age,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cache path, downloading the file first when it is
    /// missing or at least `max_age` old.
    ///
    /// The file is overwritten in place; an interrupted write leaves a
    /// truncated cache behind until the next refresh.
    pub async fn ensure<T>(&self, transport: &T) -> Result<PathBuf>
    where
        T: RdapTransport + ?Sized,
    {
        match self.cached_age() {
            Some(age) if age < self.max_age => {
                tracing::debug!(
                    "Using cached bootstrap file {} (age {}s)",
                    self.path.display(),
                    age.as_secs()
                );
                return Ok(self.path.clone());
            }
            Some(age) => tracing::info!(
                "Bootstrap file {} is {}s old, refreshing",
                self.path.display(),
                age.as_secs()
            ),
            None => tracing::info!("No bootstrap file at {}, downloading", self.path.display()),
        }

        self.download(transport).await?;
        Ok(self.path.clone())
    }

    async fn download<T>(&self, transport: &T) -> Result<()>
    where
        T: RdapTransport + ?Sized,
    {
        let body = transport.get(&RdapRequest::get(&self.url)).await?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &body)?;

        tracing::info!(
            "📥 Saved bootstrap file ({} bytes) to {}",
            body.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Age of the cached file, `None` if it does not exist or has no mtime.
    fn cached_age(&self) -> Option<Duration> {
        let modified = fs::metadata(&self.path).ok()?.modified().ok()?;
        Some(file_age(modified, SystemTime::now()))
    }
}

/// Time elapsed since `modified`. An mtime in the future counts as zero.
pub fn file_age(modified: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(modified).unwrap_or(Duration::ZERO)
}
