// Re-export modules
pub mod aggregator;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod parsers;
pub mod query;
pub mod report;
pub mod results;
pub mod sources;
pub mod urls;
pub mod utils;

// Re-export commonly used types for convenience
pub use aggregator::{CollectedListings, PaginationAggregator, TemplateFailure};
pub use cache::DatasetCache;
pub use config::HarvestConfig;
pub use error::HarvestError;
pub use query::SearchQuery;
pub use results::{Dataset, DatasetOrigin, ListingRecord};

use fetcher::PageFetcher;
use parsers::ListingExtractor;
use sources::{DocumentSource, HttpSource};
use std::path::{Path, PathBuf};
use urls::UrlBuilder;

/// Environment variable overriding the configured cache directory
pub const CACHE_DIR_ENV: &str = "USED_CARS_CACHE_DIR";

/// Main builder for loading a named dataset of listings
pub struct Harvest {
    name: String,
    make: String,
    models: Vec<String>,
    max_distance: u32,
    zip_code: u32,
    page_size: Option<u32>,
    cache_dir: Option<PathBuf>,
    refresh: bool,
    config: HarvestConfig,
}

impl Harvest {
    /// Create a new builder for dataset `name`
    pub fn new(
        name: impl Into<String>,
        make: impl Into<String>,
        models: Vec<String>,
        max_distance: u32,
        zip_code: u32,
    ) -> Self {
        Self {
            name: name.into(),
            make: make.into(),
            models,
            max_distance,
            zip_code,
            page_size: None,
            cache_dir: None,
            refresh: false,
            config: HarvestConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: HarvestConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, HarvestError> {
        let config = HarvestConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self, HarvestError> {
        let config = HarvestConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Override the configured cache directory
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Override the configured page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Collect from the site even if a cached copy exists, replacing it on success
    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    /// The search query this builder will run
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(
            self.make.clone(),
            self.models.clone(),
            self.max_distance,
            self.zip_code,
            self.page_size.unwrap_or(self.config.page_size),
        )
    }

    /// Load the dataset, fetching over HTTP on a cache miss
    pub async fn load(self) -> Result<Dataset, HarvestError> {
        let source = HttpSource::new(&self.config)?;
        self.load_with(source).await
    }

    /// Load the dataset using the given document source on a cache miss
    pub async fn load_with<S: DocumentSource>(self, source: S) -> Result<Dataset, HarvestError> {
        let env_cache_dir = std::env::var(CACHE_DIR_ENV).ok();
        self.load_from(source, env_cache_dir).await
    }

    /// Cache directory: explicit override, then the environment, then the configuration
    fn cache_dir(&self, env_cache_dir: Option<String>) -> PathBuf {
        if let Some(dir) = &self.cache_dir {
            return dir.clone();
        }
        match env_cache_dir {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => self.config.cache_dir.clone(),
        }
    }

    async fn load_from<S: DocumentSource>(
        self,
        source: S,
        env_cache_dir: Option<String>,
    ) -> Result<Dataset, HarvestError> {
        let query = self.query();
        query.validate()?;

        let selectors = &self.config.selectors;
        let aggregator = PaginationAggregator::new(
            UrlBuilder::new(&self.config.base_url, &self.config.stock_type),
            PageFetcher::new(source, selectors)?,
            ListingExtractor::new(selectors, &self.config.source_name)?,
        );
        let cache = DatasetCache::new(self.cache_dir(env_cache_dir), aggregator);

        if self.refresh {
            cache.refresh(&self.name, &query).await
        } else {
            cache.load(&self.name, &query).await
        }
    }
}
