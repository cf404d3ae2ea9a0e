use crate::error::HarvestError;
use serde::{Deserialize, Serialize};

/// Search parameters for one dataset: a make and the models to collect for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub make: String,
    pub models: Vec<String>,
    /// Search radius around `zip_code`, in miles
    pub max_distance: u32,
    pub zip_code: u32,
    pub page_size: u32,
}

impl SearchQuery {
    /// Create a query; call `validate` before using it
    pub fn new(
        make: impl Into<String>,
        models: Vec<String>,
        max_distance: u32,
        zip_code: u32,
        page_size: u32,
    ) -> Self {
        Self {
            make: make.into(),
            models,
            max_distance,
            zip_code,
            page_size,
        }
    }

    /// Rejects queries that cannot produce a URL template
    pub fn validate(&self) -> Result<(), HarvestError> {
        if self.make.trim().is_empty() {
            return Err(HarvestError::InvalidQuery("make is empty".to_string()));
        }
        if self.models.is_empty() {
            return Err(HarvestError::InvalidQuery(
                "at least one model is required".to_string(),
            ));
        }
        if let Some(pos) = self.models.iter().position(|m| m.trim().is_empty()) {
            return Err(HarvestError::InvalidQuery(format!(
                "model #{} is empty",
                pos + 1
            )));
        }
        if self.page_size == 0 {
            return Err(HarvestError::InvalidQuery(
                "page_size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(models: &[&str]) -> SearchQuery {
        SearchQuery::new(
            "toyota",
            models.iter().map(|m| m.to_string()).collect(),
            100,
            80302,
            100,
        )
    }

    #[test]
    fn test_valid_query() {
        assert!(query(&["tacoma", "4runner"]).validate().is_ok());
    }

    #[test]
    fn test_empty_models_rejected() {
        let err = query(&[]).validate().unwrap_err();
        assert!(matches!(err, HarvestError::InvalidQuery(_)));
    }

    #[test]
    fn test_blank_model_rejected() {
        let err = query(&["tacoma", "  "]).validate().unwrap_err();
        assert!(err.to_string().contains("model #2"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut q = query(&["tacoma"]);
        q.page_size = 0;
        assert!(matches!(q.validate(), Err(HarvestError::InvalidQuery(_))));
    }

    #[test]
    fn test_blank_make_rejected() {
        let mut q = query(&["tacoma"]);
        q.make = String::new();
        assert!(matches!(q.validate(), Err(HarvestError::InvalidQuery(_))));
    }
}
