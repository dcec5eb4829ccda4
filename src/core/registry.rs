use crate::domain::model::{DomainTarget, RdapRequest};
use crate::domain::ports::RdapTransport;
use crate::utils::error::Result;

pub fn domain_url(server: &str, domain: &DomainTarget) -> String {
    format!("{}/domain/{}", server, domain.name())
}

/// Looks the domain up at its registry. The body is returned unvalidated.
pub async fn query<T>(transport: &T, domain: &DomainTarget, server: &str) -> Result<serde_json::Value>
where
    T: RdapTransport + ?Sized,
{
    let url = domain_url(server, domain);
    tracing::debug!("Querying registry: {}", url);
    transport.get_json(&RdapRequest::get(url)).await
}
