use crate::error::HarvestError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// CSS selectors describing where listing data lives in a results page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Container element for one search result
    #[serde(default = "default_listing_selector")]
    pub listing: String,

    /// Element holding the "<number> <unit>" mileage text
    #[serde(default = "default_mileage_selector")]
    pub mileage: String,

    /// Badge element carrying the serialized listing payload
    #[serde(default = "default_payload_selector")]
    pub payload: String,

    /// Attribute on the badge element that holds the JSON payload
    #[serde(default = "default_payload_attribute")]
    pub payload_attribute: String,
}

/// Configuration for a harvesting run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Search results endpoint, including the trailing `?`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Number of listings requested per page; a shorter page ends pagination
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Value of the `stock_type` query parameter (all, used, new)
    #[serde(default = "default_stock_type")]
    pub stock_type: String,

    /// Identifier written into the `source` column of every record
    #[serde(default = "default_source_name")]
    pub source_name: String,

    /// Directory holding cached dataset files
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Per-request timeout handed to the HTTP client
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl HarvestConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HarvestError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, HarvestError> {
        let config: Self = serde_json::from_str(json)?;
        if config.page_size == 0 {
            return Err(HarvestError::Config("page_size must be positive".to_string()));
        }
        Ok(config)
    }
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            stock_type: default_stock_type(),
            source_name: default_source_name(),
            cache_dir: default_cache_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing: default_listing_selector(),
            mileage: default_mileage_selector(),
            payload: default_payload_selector(),
            payload_attribute: default_payload_attribute(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.cars.com/shopping/results/?".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_stock_type() -> String {
    "all".to_string()
}

fn default_source_name() -> String {
    "cars.com".to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("used-cars/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_listing_selector() -> String {
    "div.vehicle-details".to_string()
}

fn default_mileage_selector() -> String {
    "div.mileage".to_string()
}

fn default_payload_selector() -> String {
    "button.vehicle-badging.has-miles-from.ep-theme-hubcap".to_string()
}

fn default_payload_attribute() -> String {
    "data-override-payload".to_string()
}
