use super::PageFetcher;
use crate::config::Config;
use crate::error::LookupError;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// [`PageFetcher`] backed by a reqwest client with a bounded timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(LookupError::Client)?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        Self::new(config.timeout(), &config.user_agent)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, LookupError> {
        debug!(%url, "fetching page");

        let transport = |source| LookupError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(%url, bytes = body.len(), "page fetched");
        Ok(body)
    }
}
