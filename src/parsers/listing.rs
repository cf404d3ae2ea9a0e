use crate::config::SelectorConfig;
use crate::error::HarvestError;
use crate::parsers::html;
use crate::results::ListingRecord;
use regex::Regex;
use scraper::{ElementRef, Selector};
use serde::Deserialize;
use std::sync::LazyLock;

/// Leading "<number>" of a "<number> <unit>" mileage string, with optional thousands separators
static MILEAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d[\d,]*)(?:\s|$)").expect("mileage pattern is valid"));

/// Listing attributes the site embeds as JSON in the badge element
#[derive(Debug, Deserialize)]
struct ListingPayload {
    #[serde(default)]
    trim: Option<String>,
    make: String,
    model: String,
    model_year: i32,
    stock_type: String,
    price: f64,
    listing_id: String,
}

/// Turns one listing container into a normalized record
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    mileage: Selector,
    payload: Selector,
    payload_attribute: String,
    source_name: String,
}

impl ListingExtractor {
    /// Compile the mileage and payload selectors
    pub fn new(selectors: &SelectorConfig, source_name: impl Into<String>) -> Result<Self, HarvestError> {
        Ok(Self {
            mileage: html::compile("mileage", &selectors.mileage)?,
            payload: html::compile("payload", &selectors.payload)?,
            payload_attribute: selectors.payload_attribute.clone(),
            source_name: source_name.into(),
        })
    }

    /// Extracts a record from `element`.
    ///
    /// Returns `Ok(None)` when the container has no payload badge (placeholders,
    /// ads, cards still loading). A mileage or payload that is present but
    /// unreadable is a `MalformedField` error.
    pub fn extract(&self, element: ElementRef<'_>) -> Result<Option<ListingRecord>, HarvestError> {
        let mileage = match html::find_first(&element, &self.mileage) {
            Some(el) => parse_mileage(&html::text_of(&el))?,
            None => 0,
        };

        let Some(raw) = html::find_first(&element, &self.payload)
            .and_then(|badge| badge.value().attr(&self.payload_attribute))
        else {
            return Ok(None);
        };

        let payload: ListingPayload =
            serde_json::from_str(raw).map_err(|_| HarvestError::malformed("payload", raw))?;

        Ok(Some(ListingRecord {
            mileage,
            trim: payload.trim.unwrap_or_default(),
            make: payload.make,
            model: payload.model,
            year: payload.model_year,
            used_or_new: payload.stock_type,
            price: payload.price,
            listing_id: payload.listing_id,
            source: self.source_name.clone(),
        }))
    }
}

/// Parses text like `"45,231 mi."` into `45231`
pub fn parse_mileage(text: &str) -> Result<u64, HarvestError> {
    let text = text.trim();
    let digits = MILEAGE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| HarvestError::malformed("mileage", text))?
        .as_str()
        .replace(',', "");

    digits
        .parse::<u64>()
        .map_err(|_| HarvestError::malformed("mileage", text))
}
