use crate::error::HarvestError;
use scraper::{ElementRef, Html, Selector};

/// Compiles a configured CSS selector, reporting which setting was invalid
pub fn compile(name: &str, css: &str) -> Result<Selector, HarvestError> {
    Selector::parse(css)
        .map_err(|e| HarvestError::Config(format!("invalid {} selector {:?}: {}", name, css, e)))
}

/// Parses a raw results page into a queryable document
pub fn parse_document(body: &str) -> Html {
    Html::parse_document(body)
}

/// Returns every element in the document matching the container selector
pub fn find_all<'a>(doc: &'a Html, selector: &Selector) -> Vec<ElementRef<'a>> {
    let found = doc.select(selector).collect::<Vec<_>>();
    ::log::debug!("HTML parser found {} listing containers", found.len());
    found
}

/// First descendant of `element` matching `selector`
pub fn find_first<'a>(element: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element.select(selector).next()
}

/// Text content of an element, with surrounding whitespace trimmed
pub fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
