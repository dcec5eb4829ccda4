use crate::domain::model::{RdapRequest, TlsVerification};
use crate::domain::ports::RdapTransport;
use crate::utils::error::{RdapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;

/// reqwest-backed transport. Both clients are built up front so the
/// insecure one is only ever picked by an explicit `TlsVerification::Disabled`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    strict: Client,
    insecure: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let strict = Client::builder().user_agent(user_agent).build()?;
        let insecure = Client::builder()
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self { strict, insecure })
    }

    fn client(&self, tls: TlsVerification) -> &Client {
        match tls {
            TlsVerification::Strict => &self.strict,
            TlsVerification::Disabled => &self.insecure,
        }
    }
}

#[async_trait]
impl RdapTransport for ReqwestTransport {
    async fn get(&self, request: &RdapRequest) -> Result<Vec<u8>> {
        let mut builder = self.client(request.tls).get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        tracing::debug!("GET {} (tls: {:?})", request.url, request.tls);
        let response = builder
            .send()
            .await
            .map_err(|e| classify_send_error(&request.url, e))?;

        let status = response.status();
        tracing::debug!("Response status from {}: {}", request.url, status);

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("Could not read error body from {}: {}", request.url, e);
                    String::new()
                }
            };
            return Err(RdapError::Http {
                url: request.url.clone(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

fn classify_send_error(url: &str, err: reqwest::Error) -> RdapError {
    if is_tls_failure(&err) {
        RdapError::Tls {
            url: url.to_string(),
            message: error_chain(&err),
        }
    } else {
        RdapError::Transport(err)
    }
}

/// True when the error chain carries a rustls error or reads like a
/// certificate / handshake failure.
pub fn is_tls_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.downcast_ref::<rustls::Error>().is_some() {
            return true;
        }
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if io
                .get_ref()
                .is_some_and(|inner| inner.downcast_ref::<rustls::Error>().is_some())
            {
                return true;
            }
        }

        let text = e.to_string().to_ascii_lowercase();
        if text.contains("certificate") || text.contains("handshake") {
            return true;
        }

        current = e.source();
    }
    false
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(e) = current {
        parts.push(e.to_string());
        current = e.source();
    }
    parts.join(": ")
}
