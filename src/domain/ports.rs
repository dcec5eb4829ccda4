use crate::domain::model::RdapRequest;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
pub trait RdapTransport: Send + Sync {
    /// Performs the GET and returns the body. Non-2xx answers become
    /// `RdapError::Http`, certificate failures `RdapError::Tls`.
    async fn get(&self, request: &RdapRequest) -> Result<Vec<u8>>;

    async fn get_json(&self, request: &RdapRequest) -> Result<serde_json::Value> {
        let body = self.get(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
