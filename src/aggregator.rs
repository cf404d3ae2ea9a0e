use crate::error::HarvestError;
use crate::fetcher::{FetchedPage, PageFetcher};
use crate::parsers::ListingExtractor;
use crate::query::SearchQuery;
use crate::results::{ListingRecord, PageResult};
use crate::sources::DocumentSource;
use crate::urls::{PageUrl, UrlBuilder};

/// A model template whose pagination stopped on a fetch failure
#[derive(Debug)]
pub struct TemplateFailure {
    pub make: String,
    pub model: String,
    /// Page number whose fetch failed
    pub page: u32,
    pub error: HarvestError,
}

/// Everything one run collected, plus what went wrong along the way
#[derive(Debug, Default)]
pub struct CollectedListings {
    /// Records in traversal order: model order outer, page order inner
    pub records: Vec<ListingRecord>,
    pub failures: Vec<TemplateFailure>,
    /// Listing containers skipped because a field was malformed
    pub malformed: usize,
    pub pages_fetched: usize,
}

impl CollectedListings {
    /// True when every template paginated to its end without a fetch failure
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Walks every model template page by page and concatenates the results
pub struct PaginationAggregator<S> {
    urls: UrlBuilder,
    fetcher: PageFetcher<S>,
    extractor: ListingExtractor,
}

impl<S: DocumentSource> PaginationAggregator<S> {
    /// Create an aggregator from its three stages
    pub fn new(urls: UrlBuilder, fetcher: PageFetcher<S>, extractor: ListingExtractor) -> Self {
        Self {
            urls,
            fetcher,
            extractor,
        }
    }

    /// The page fetcher driving each template
    pub fn fetcher(&self) -> &PageFetcher<S> {
        &self.fetcher
    }

    /// Collect all listings for `query`.
    ///
    /// Only an invalid query is returned as `Err`. A fetch failure ends the
    /// affected template and is reported in `CollectedListings::failures`;
    /// the remaining templates still run.
    pub async fn run(&self, query: &SearchQuery) -> Result<CollectedListings, HarvestError> {
        let templates = self.urls.build(query)?;
        let mut collected = CollectedListings::default();

        for template in &templates {
            self.collect_template(template, query.page_size, &mut collected)
                .await;
        }

        ::log::info!(
            "Run finished: {} listings from {} pages, {} malformed, {} failed template(s)",
            collected.records.len(),
            collected.pages_fetched,
            collected.malformed,
            collected.failures.len()
        );
        Ok(collected)
    }

    async fn collect_template(
        &self,
        template: &PageUrl,
        page_size: u32,
        collected: &mut CollectedListings,
    ) {
        let mut page = 1;
        let mut should_continue = true;

        while should_continue {
            let url = template.resolve(page);
            ::log::debug!("Fetching {}-{} page {}: {}", template.make, template.model, page, url);

            let fetched = match self.fetcher.fetch(&url).await {
                Ok(fetched) => fetched,
                Err(error) => {
                    ::log::error!(
                        "Stopping {}-{} at page {}: {}",
                        template.make,
                        template.model,
                        page,
                        error
                    );
                    collected.failures.push(TemplateFailure {
                        make: template.make.clone(),
                        model: template.model.clone(),
                        page,
                        error,
                    });
                    return;
                }
            };

            let result = self.extract_page(&fetched);
            collected.pages_fetched += 1;
            collected.malformed += result.malformed;
            collected.records.extend(result.records);

            // A short page is taken as the last one
            should_continue = result.elements_found == page_size as usize;
            page += 1;

            ::log::info!("Collected {} listings.", collected.records.len());
        }
    }

    /// Extracts every container on the page, skipping malformed ones
    pub fn extract_page(&self, page: &FetchedPage) -> PageResult {
        let elements = page.listings();
        let mut result = PageResult {
            elements_found: elements.len(),
            ..PageResult::default()
        };

        for element in elements {
            match self.extractor.extract(element) {
                Ok(Some(record)) => result.records.push(record),
                Ok(None) => ::log::trace!("Container without listing payload on {}", page.url()),
                Err(e) => {
                    ::log::warn!("Skipping listing on {}: {}", page.url(), e);
                    result.malformed += 1;
                }
            }
        }

        result
    }
}
