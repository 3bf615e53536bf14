use crate::utils::error::Result;
use async_trait::async_trait;

/// Upstream access seam. The production implementation lives in
/// `core::fetch`; tests substitute their own.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String>;
    async fn fetch_pdf(&self, url: &str) -> Result<Vec<u8>>;
}
