use crate::error::HarvestError;
use crate::sources::DocumentSource;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// In-memory source for tests: serves canned documents and records every request
#[derive(Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    /// An empty source; every request fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for the exact URL `url`
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl DocumentSource for MemorySource {
    async fn fetch(&self, url: &Url) -> Result<String, HarvestError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| HarvestError::fetch(url.as_str(), "HTTP status 404 Not Found"))
    }
}

/// Markup for one listing container with the given mileage text and payload
pub fn listing_html(mileage: Option<&str>, payload: Option<&str>) -> String {
    let mut html = String::from(r#"<div class="vehicle-details">"#);
    if let Some(mileage) = mileage {
        html.push_str(&format!(r#"<div class="mileage">{}</div>"#, mileage));
    }
    if let Some(payload) = payload {
        html.push_str(&format!(
            r#"<button class="vehicle-badging has-miles-from ep-theme-hubcap" data-override-payload="{}">Good deal</button>"#,
            escape_attr(payload)
        ));
    }
    html.push_str("</div>");
    html
}

/// JSON payload as the site embeds it for one listing
pub fn payload_json(model: &str, listing_id: &str, price: u32) -> String {
    format!(
        r#"{{"trim":"SR5","make":"toyota","model":"{}","model_year":2019,"stock_type":"used","price":{},"listing_id":"{}","customer_id":"1234"}}"#,
        model, price, listing_id
    )
}

/// A full results page containing `count` well-formed listings for `model`
pub fn results_page(model: &str, page: u32, count: usize) -> String {
    let listings: String = (0..count)
        .map(|i| {
            let payload = payload_json(model, &format!("{}-{}-{}", model, page, i), 20000 + i as u32);
            listing_html(Some("45,231 mi."), Some(&payload))
        })
        .collect();
    wrap_page(&listings)
}

pub fn wrap_page(listings: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Results</title></head><body><div class="vehicle-cards">{}</div></body></html>"#,
        listings
    )
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
