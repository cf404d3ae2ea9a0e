use crate::config::HarvestConfig;
use crate::error::HarvestError;
use crate::sources::DocumentSource;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Document source backed by a plain HTTP GET
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Build the HTTP client from the configured user agent and timeout
    pub fn new(config: &HarvestConfig) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| HarvestError::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<String, HarvestError> {
        ::log::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| HarvestError::fetch(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HarvestError::fetch(
                url.as_str(),
                format!("HTTP status {}", status),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| HarvestError::fetch(url.as_str(), e))?;
        ::log::trace!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
