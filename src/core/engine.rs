use crate::config::AppConfig;
use crate::core::bootstrap::BootstrapCache;
use crate::core::entry::EntryWriter;
use crate::core::registrar::find_registrar;
use crate::core::registry;
use crate::core::resolver::BootstrapDirectory;
use crate::domain::model::{DomainTarget, Link};
use crate::domain::ports::{RdapTransport, Storage};
use crate::utils::error::Result;
use std::path::PathBuf;

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryOutcome {
    pub location: PathBuf,
    pub server: String,
    pub registrar_found: bool,
}

/// Runs one lookup from bootstrap file to stored entry. Any failure ends
/// the run; files already written stay on disk.
pub struct EntryEngine<T: RdapTransport, S: Storage> {
    bootstrap: BootstrapCache,
    transport: T,
    writer: EntryWriter<S>,
}

impl<T: RdapTransport, S: Storage> EntryEngine<T, S> {
    pub fn new(bootstrap: BootstrapCache, transport: T, writer: EntryWriter<S>) -> Self {
        Self {
            bootstrap,
            transport,
            writer,
        }
    }

    pub async fn run(&self, domain: &DomainTarget) -> Result<EntryOutcome> {
        let cache_path = self.bootstrap.ensure(&self.transport).await?;
        let directory = BootstrapDirectory::load(&cache_path)?;

        let server = directory.resolve(domain.tld())?;
        tracing::info!("🔎 Found TLD server: {}", server);

        let registry_result = registry::query(&self.transport, domain, &server).await?;
        self.writer.write_registry(domain, &registry_result).await?;

        let links = Link::from_response(&registry_result);
        let registrar_result = find_registrar(&self.transport, &links).await?;
        if let Some(registrar) = &registrar_result {
            self.writer.write_registrar(domain, registrar).await?;
        } else {
            tracing::info!("No registrar referral found for {}", domain);
        }

        let location = self.writer.location(domain);
        tracing::info!("📁 Wrote entry to {}", location.display());

        Ok(EntryOutcome {
            location,
            server,
            registrar_found: registrar_result.is_some(),
        })
    }
}

impl<T: RdapTransport> EntryEngine<T, crate::adapters::storage::LocalStorage> {
    pub fn from_config(config: &AppConfig, transport: T) -> Self {
        Self::new(
            BootstrapCache::from_config(config),
            transport,
            EntryWriter::local(config.entries_dir.clone()),
        )
    }
}
