use crate::parsers::html;
use crate::sources::memory::{listing_html, wrap_page};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_counts_containers() {
        let body = wrap_page(&format!(
            "{}{}{}",
            listing_html(Some("10 mi."), None),
            listing_html(None, None),
            listing_html(Some("12 mi."), None),
        ));
        let doc = html::parse_document(&body);
        let selector = html::compile("listing", "div.vehicle-details").unwrap();
        assert_eq!(html::find_all(&doc, &selector).len(), 3);
    }

    #[test]
    fn test_find_all_ignores_other_elements() {
        let body = wrap_page(r#"<div class="sponsored-card">ad</div><div class="vehicle-card"></div>"#);
        let doc = html::parse_document(&body);
        let selector = html::compile("listing", "div.vehicle-details").unwrap();
        assert!(html::find_all(&doc, &selector).is_empty());
    }

    #[test]
    fn test_text_of_trims_whitespace() {
        let doc = html::parse_document("<div class=\"mileage\">\n   45,231 mi.  \n</div>");
        let selector = html::compile("mileage", "div.mileage").unwrap();
        let el = html::find_all(&doc, &selector)[0];
        assert_eq!(html::text_of(&el), "45,231 mi.");
    }

    #[test]
    fn test_invalid_selector_is_config_error() {
        let err = html::compile("listing", "div[").unwrap_err();
        assert!(err.to_string().contains("invalid listing selector"));
    }
}
