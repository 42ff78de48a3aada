pub mod cache;
pub mod http;

use async_trait::async_trait;

use crate::error::FetchError;

pub use cache::ResponseCache;
pub use http::HttpFetcher;

/// Source of raw index-page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}
