use crate::domain::model::{Link, RdapRequest};
use crate::domain::ports::RdapTransport;
use crate::utils::error::{RdapError, Result};

const REFERRAL_RELS: [&str; 2] = ["related", "registration"];

// Some registrars (Aliyun, Dominet) answer with garbage unless both are set.
const ACCEPT: &str = "application/json, application/rdap+json";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// First link that points at the registrar's own RDAP record.
pub fn select_referral(links: &[Link]) -> Option<&str> {
    links.iter().find_map(|link| {
        let rel = link.rel.as_deref()?;
        let href = link.href.as_deref().filter(|href| !href.is_empty())?;
        REFERRAL_RELS.contains(&rel).then_some(href)
    })
}

pub fn referral_request(href: &str) -> RdapRequest {
    RdapRequest::get(href)
        .with_header("Accept", ACCEPT)
        .with_header("Accept-Language", ACCEPT_LANGUAGE)
}

/// Sends `request`; if the TLS handshake fails, sends it once more with
/// certificate verification disabled. Only `RdapError::Tls` triggers the
/// second attempt.
pub async fn fetch_with_tls_fallback<T>(transport: &T, request: &RdapRequest) -> Result<Vec<u8>>
where
    T: RdapTransport + ?Sized,
{
    match transport.get(request).await {
        Err(RdapError::Tls { url, message }) => {
            tracing::warn!(
                "⚠️ Failed to connect to {} with TLS ({}), retrying without certificate verification",
                url,
                message
            );
            transport.get(&request.insecure()).await
        }
        other => other,
    }
}

/// Follows the first registrar referral in `links`.
///
/// Returns `None` when no link qualifies or the registrar answers with an
/// empty body (`null`, `{}`, `[]`, `""`, `0`, `false`). Failures of the
/// selected link are returned as errors; later links are not tried.
pub async fn find_registrar<T>(transport: &T, links: &[Link]) -> Result<Option<serde_json::Value>>
where
    T: RdapTransport + ?Sized,
{
    let Some(href) = select_referral(links) else {
        tracing::debug!("No registrar referral among {} links", links.len());
        return Ok(None);
    };

    tracing::info!("Following registrar referral: {}", href);
    let body = fetch_with_tls_fallback(transport, &referral_request(href)).await?;
    let registrar: serde_json::Value = serde_json::from_slice(&body)?;
    if is_blank(&registrar) {
        tracing::warn!("Registrar at {} returned an empty response", href);
        return Ok(None);
    }
    Ok(Some(registrar))
}

/// JSON values that carry nothing worth storing.
pub fn is_blank(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
