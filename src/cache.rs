use crate::aggregator::PaginationAggregator;
use crate::error::HarvestError;
use crate::query::SearchQuery;
use crate::results::{Dataset, DatasetOrigin, ListingRecord};
use crate::sources::DocumentSource;
use crate::utils::sanitize_filename;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One line of the cache file: the row index followed by the record's fields
#[derive(Debug, Serialize, Deserialize)]
struct CacheRow {
    #[serde(rename = "")]
    index: usize,
    mileage: u64,
    trim: String,
    make: String,
    model: String,
    year: i32,
    used_or_new: String,
    price: f64,
    listing_id: String,
    source: String,
}

impl CacheRow {
    fn new(index: usize, record: &ListingRecord) -> Self {
        Self {
            index,
            mileage: record.mileage,
            trim: record.trim.clone(),
            make: record.make.clone(),
            model: record.model.clone(),
            year: record.year,
            used_or_new: record.used_or_new.clone(),
            price: record.price,
            listing_id: record.listing_id.clone(),
            source: record.source.clone(),
        }
    }
}

impl From<CacheRow> for ListingRecord {
    fn from(row: CacheRow) -> Self {
        Self {
            mileage: row.mileage,
            trim: row.trim,
            make: row.make,
            model: row.model,
            year: row.year,
            used_or_new: row.used_or_new,
            price: row.price,
            listing_id: row.listing_id,
            source: row.source,
        }
    }
}

/// Disk-backed cache of whole datasets, one CSV file per dataset name
pub struct DatasetCache<S> {
    dir: PathBuf,
    aggregator: PaginationAggregator<S>,
}

impl<S: DocumentSource> DatasetCache<S> {
    /// Create a cache rooted at `dir` that collects misses with `aggregator`
    pub fn new(dir: impl Into<PathBuf>, aggregator: PaginationAggregator<S>) -> Self {
        Self {
            dir: dir.into(),
            aggregator,
        }
    }

    /// The aggregator used on a cache miss
    pub fn aggregator(&self) -> &PaginationAggregator<S> {
        &self.aggregator
    }

    /// Path of the cache file for `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", sanitize_filename(name)))
    }

    /// Whether a cached file exists for `name`
    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Removes the cached file for `name`, if any. Returns whether one existed.
    pub fn invalidate(&self, name: &str) -> Result<bool, HarvestError> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)?;
        ::log::info!("Removed cached dataset {}", path.display());
        Ok(true)
    }

    /// Returns the dataset for `name`, from disk if cached, otherwise from the site.
    ///
    /// A run that did not complete is returned as `HarvestError::IncompleteRun`
    /// with whatever was collected, and nothing is written to disk.
    pub async fn load(&self, name: &str, query: &SearchQuery) -> Result<Dataset, HarvestError> {
        query.validate()?;

        let path = self.path_for(name);
        if path.is_file() {
            ::log::info!("Loading dataset {:?} from {}", name, path.display());
            let rows = read_rows(&path)?;
            return Ok(Dataset::new(name, rows, DatasetOrigin::Cache));
        }

        ::log::info!("No cache for dataset {:?}, collecting from source", name);
        self.collect_and_store(name, query).await
    }

    /// Collects `name` from the site even when a cached copy exists.
    ///
    /// The cached file is replaced only after a complete run; on failure the
    /// previous copy is left untouched.
    pub async fn refresh(&self, name: &str, query: &SearchQuery) -> Result<Dataset, HarvestError> {
        query.validate()?;

        ::log::info!("Refreshing dataset {:?} from source", name);
        self.collect_and_store(name, query).await
    }

    async fn collect_and_store(
        &self,
        name: &str,
        query: &SearchQuery,
    ) -> Result<Dataset, HarvestError> {
        let collected = self.aggregator.run(query).await?;
        if !collected.is_complete() {
            return Err(HarvestError::IncompleteRun {
                collected: collected.records,
                failures: collected.failures,
            });
        }

        let dataset = Dataset::new(name, collected.records, DatasetOrigin::Source);
        self.store(&self.path_for(name), &dataset.rows)?;
        Ok(dataset)
    }

    /// Writes the whole file next to its final location, then renames it into place
    fn store(&self, path: &Path, rows: &[ListingRecord]) -> Result<(), HarvestError> {
        fs::create_dir_all(&self.dir)?;

        let partial = path.with_extension("csv.partial");
        let written = write_rows(&partial, rows)
            .and_then(|()| fs::rename(&partial, path).map_err(HarvestError::from));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&partial) {
                ::log::warn!("Could not remove {}: {}", partial.display(), cleanup);
            }
            return Err(e);
        }

        ::log::info!("Cached {} rows in {}", rows.len(), path.display());
        Ok(())
    }
}

fn read_rows(path: &Path) -> Result<Vec<ListingRecord>, HarvestError> {
    let mut reader = csv::Reader::from_path(path)?;
    reader
        .deserialize::<CacheRow>()
        .map(|row| row.map(ListingRecord::from).map_err(HarvestError::from))
        .collect()
}

fn write_rows(path: &Path, rows: &[ListingRecord]) -> Result<(), HarvestError> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        // Headers are normally emitted with the first serialized row
        writer.write_record([
            "", "mileage", "trim", "make", "model", "year", "used_or_new", "price", "listing_id",
            "source",
        ])?;
    }
    for (index, record) in rows.iter().enumerate() {
        writer.serialize(CacheRow::new(index, record))?;
    }
    writer.flush()?;
    Ok(())
}
