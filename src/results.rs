use serde::{Deserialize, Serialize};

/// One normalized vehicle listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Odometer reading; 0 when the listing shows none
    pub mileage: u64,
    pub trim: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Stock type as reported by the site ("used", "new", "cpo", ...)
    pub used_or_new: String,
    pub price: f64,
    pub listing_id: String,
    /// Site the listing was collected from
    pub source: String,
}

/// Records extracted from a single fetched page
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    pub records: Vec<ListingRecord>,
    /// Listing containers found on the page, whether or not they yielded a record
    pub elements_found: usize,
    /// Containers dropped because a field was malformed
    pub malformed: usize,
}

/// Where a materialized dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    /// Read back from the on-disk cache
    Cache,
    /// Collected from the site during this run and then persisted
    Source,
}

/// A named, fully materialized set of listings
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub rows: Vec<ListingRecord>,
    pub origin: DatasetOrigin,
}

impl Dataset {
    /// Create a dataset from already materialized rows
    pub fn new(name: impl Into<String>, rows: Vec<ListingRecord>, origin: DatasetOrigin) -> Self {
        Self {
            name: name.into(),
            rows,
            origin,
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
