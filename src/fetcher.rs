use crate::config::SelectorConfig;
use crate::error::HarvestError;
use crate::parsers::html;
use crate::sources::DocumentSource;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A fetched and parsed results page
pub struct FetchedPage {
    url: String,
    document: Html,
    listing: Selector,
}

impl FetchedPage {
    /// The URL the page was fetched from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Every listing container on the page, in document order
    pub fn listings(&self) -> Vec<ElementRef<'_>> {
        html::find_all(&self.document, &self.listing)
    }
}

/// Retrieves one results page and locates its listing containers
pub struct PageFetcher<S> {
    source: S,
    listing: Selector,
}

impl<S: DocumentSource> PageFetcher<S> {
    /// Create a fetcher reading pages from `source`
    pub fn new(source: S, selectors: &SelectorConfig) -> Result<Self, HarvestError> {
        Ok(Self {
            source,
            listing: html::compile("listing", &selectors.listing)?,
        })
    }

    /// The underlying document source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Performs exactly one retrieval and one parse. No retries.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, HarvestError> {
        let parsed = Url::parse(url).map_err(|e| HarvestError::fetch(url, e))?;
        let body = self.source.fetch(&parsed).await?;

        Ok(FetchedPage {
            url: url.to_string(),
            document: html::parse_document(&body),
            listing: self.listing.clone(),
        })
    }
}
