pub mod http;

#[cfg(test)]
pub(crate) mod memory;

use crate::error::HarvestError;
use url::Url;

pub use http::HttpSource;

/// Retrieves the raw document behind a URL
///
/// This is the only network-facing seam in the crate; everything downstream
/// works on the returned markup.
#[async_trait::async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch the document body, failing with `HarvestError::FetchFailure`
    async fn fetch(&self, url: &Url) -> Result<String, HarvestError>;
}
