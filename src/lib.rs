pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, StatsConfig, StatsFormat};

pub use adapters::{http::ReqwestTransport, storage::LocalStorage};
pub use config::AppConfig;
pub use crate::core::{
    bootstrap::BootstrapCache,
    engine::{EntryEngine, EntryOutcome},
    entry::EntryWriter,
    resolver::BootstrapDirectory,
};
pub use domain::model::DomainTarget;
pub use utils::error::{RdapError, Result};
