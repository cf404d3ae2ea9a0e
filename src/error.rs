use crate::aggregator::TemplateFailure;
use crate::results::ListingRecord;
use thiserror::Error;

/// Errors raised while building, fetching, extracting or caching listings
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The search parameters were rejected before any I/O took place
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A page could not be retrieved or its URL was unusable
    #[error("failed to fetch {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// A listing carried a field that was present but not in the expected shape
    #[error("malformed {field} in listing: {value:?}")]
    MalformedField { field: &'static str, value: String },

    /// At least one model template stopped on a fetch failure.
    /// The records collected before each failure are kept in `collected`.
    #[error("run incomplete: {} template(s) failed, {} listing(s) collected", failures.len(), collected.len())]
    IncompleteRun {
        collected: Vec<ListingRecord>,
        failures: Vec<TemplateFailure>,
    },

    /// Invalid configuration value (e.g. a selector that does not parse)
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cache file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarvestError {
    pub(crate) fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        HarvestError::FetchFailure {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        HarvestError::MalformedField {
            field,
            value: value.into(),
        }
    }
}
