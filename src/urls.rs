use crate::error::HarvestError;
use crate::query::SearchQuery;
use url::form_urlencoded::byte_serialize;

/// Token left in every template where the page number goes
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// A search URL bound to one (make, model) pair, with an unresolved page slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    pub make: String,
    pub model: String,
    template: String,
}

impl PageUrl {
    /// The URL with its page placeholder still in place
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute a concrete page number (pages start at 1)
    pub fn resolve(&self, page: u32) -> String {
        self.template.replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}

/// Builds one templated search URL per model
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base_url: String,
    stock_type: String,
}

impl UrlBuilder {
    /// Create a builder for the search endpoint at `base_url`
    pub fn new(base_url: impl Into<String>, stock_type: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            stock_type: stock_type.into(),
        }
    }

    /// One template per model in `query`, in model order
    pub fn build(&self, query: &SearchQuery) -> Result<Vec<PageUrl>, HarvestError> {
        query.validate()?;

        let make = encode(&query.make);
        let urls = query
            .models
            .iter()
            .map(|model| {
                let template = format!(
                    "{base}makes[]={make}&maximum_distance={distance}&models[]={make}-{model}\
                     &page={placeholder}&page_size={page_size}&stock_type={stock}&zip={zip:05}",
                    base = self.base_url,
                    make = make,
                    distance = query.max_distance,
                    model = encode(model),
                    placeholder = PAGE_PLACEHOLDER,
                    page_size = query.page_size,
                    stock = encode(&self.stock_type),
                    zip = query.zip_code,
                );
                ::log::debug!("Built template for {}-{}: {}", query.make, model, template);
                PageUrl {
                    make: query.make.clone(),
                    model: model.clone(),
                    template,
                }
            })
            .collect();

        Ok(urls)
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.trim().as_bytes()).collect()
}
