mod endpoints;
mod http;

pub use endpoints::Endpoints;
pub use http::HttpFetcher;

use crate::error::LookupError;
use async_trait::async_trait;
use url::Url;

/// Retrieves a page body.
///
/// Implementations must treat any status other than 200 as
/// [`LookupError::Status`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, LookupError>;
}
