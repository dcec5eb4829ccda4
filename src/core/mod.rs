pub mod bootstrap;
pub mod engine;
pub mod entry;
pub mod registrar;
pub mod registry;
pub mod resolver;
pub mod stats;

pub use crate::domain::model::{DomainTarget, Link, RdapRequest, TlsVerification};
pub use crate::domain::ports::{RdapTransport, Storage};
pub use crate::utils::error::Result;
