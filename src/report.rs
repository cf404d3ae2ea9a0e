use crate::results::{Dataset, ListingRecord};
use std::collections::BTreeMap;
use std::fmt;

/// Price and mileage statistics for a group of listings
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub count: usize,
    pub mean_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub mean_mileage: f64,
}

impl GroupStats {
    fn from_rows<'a>(rows: impl IntoIterator<Item = &'a ListingRecord>) -> Option<Self> {
        let mut stats: Option<GroupStats> = None;
        let mut price_sum = 0.0;
        let mut mileage_sum = 0.0;

        for row in rows {
            price_sum += row.price;
            mileage_sum += row.mileage as f64;
            let s = stats.get_or_insert(GroupStats {
                count: 0,
                mean_price: 0.0,
                min_price: row.price,
                max_price: row.price,
                mean_mileage: 0.0,
            });
            s.count += 1;
            s.min_price = s.min_price.min(row.price);
            s.max_price = s.max_price.max(row.price);
        }

        stats.map(|mut s| {
            s.mean_price = price_sum / s.count as f64;
            s.mean_mileage = mileage_sum / s.count as f64;
            s
        })
    }
}

/// Per-model overview of a dataset
#[derive(Debug, Clone)]
pub struct Summary {
    pub name: String,
    pub overall: Option<GroupStats>,
    pub by_model: BTreeMap<String, GroupStats>,
}

impl Summary {
    /// Group the dataset's rows by model
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut groups: BTreeMap<String, Vec<&ListingRecord>> = BTreeMap::new();
        for row in &dataset.rows {
            groups.entry(row.model.clone()).or_default().push(row);
        }

        let by_model = groups
            .into_iter()
            .filter_map(|(model, rows)| GroupStats::from_rows(rows).map(|s| (model, s)))
            .collect();

        Self {
            name: dataset.name.clone(),
            overall: GroupStats::from_rows(&dataset.rows),
            by_model,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(overall) = &self.overall else {
            return writeln!(f, "{}: no listings", self.name);
        };

        writeln!(f, "{}: {} listings", self.name, overall.count)?;
        writeln!(
            f,
            "{:<16} {:>6} {:>12} {:>12} {:>12} {:>12}",
            "model", "count", "mean price", "min price", "max price", "mean miles"
        )?;
        for (model, s) in &self.by_model {
            writeln!(
                f,
                "{:<16} {:>6} {:>12.0} {:>12.0} {:>12.0} {:>12.0}",
                model, s.count, s.mean_price, s.min_price, s.max_price, s.mean_mileage
            )?;
        }
        Ok(())
    }
}

/// Renders the first `limit` rows of a dataset as an aligned text table
pub fn preview(dataset: &Dataset, limit: usize) -> String {
    let mut out = format!(
        "{:>4} {:>8} {:<14} {:<10} {:<12} {:>4} {:<6} {:>9} {:<38} {}\n",
        "", "mileage", "trim", "make", "model", "year", "stock", "price", "listing_id", "source"
    );
    for (i, r) in dataset.rows.iter().take(limit).enumerate() {
        out.push_str(&format!(
            "{:>4} {:>8} {:<14} {:<10} {:<12} {:>4} {:<6} {:>9.0} {:<38} {}\n",
            i, r.mileage, r.trim, r.make, r.model, r.year, r.used_or_new, r.price, r.listing_id, r.source
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::DatasetOrigin;

    fn record(model: &str, price: f64, mileage: u64) -> ListingRecord {
        ListingRecord {
            mileage,
            trim: "SR5".to_string(),
            make: "toyota".to_string(),
            model: model.to_string(),
            year: 2019,
            used_or_new: "used".to_string(),
            price,
            listing_id: format!("{}-{}", model, price),
            source: "cars.com".to_string(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            "toyota-mix",
            vec![
                record("tacoma", 30000.0, 40000),
                record("tacoma", 20000.0, 80000),
                record("4runner", 35000.0, 10000),
            ],
            DatasetOrigin::Cache,
        )
    }

    #[test]
    fn test_summary_groups_by_model() {
        let summary = Summary::from_dataset(&dataset());

        let overall = summary.overall.unwrap();
        assert_eq!(overall.count, 3);
        assert_eq!(overall.min_price, 20000.0);
        assert_eq!(overall.max_price, 35000.0);

        let tacoma = &summary.by_model["tacoma"];
        assert_eq!(tacoma.count, 2);
        assert_eq!(tacoma.mean_price, 25000.0);
        assert_eq!(tacoma.mean_mileage, 60000.0);
        assert_eq!(summary.by_model["4runner"].count, 1);
    }

    #[test]
    fn test_empty_summary() {
        let empty = Dataset::new("empty", Vec::new(), DatasetOrigin::Source);
        let summary = Summary::from_dataset(&empty);
        assert!(summary.overall.is_none());
        assert_eq!(summary.to_string(), "empty: no listings\n");
    }

    #[test]
    fn test_summary_display_lists_models() {
        let text = Summary::from_dataset(&dataset()).to_string();
        assert!(text.starts_with("toyota-mix: 3 listings\n"));
        assert!(text.contains("tacoma"));
        assert!(text.contains("4runner"));
    }

    #[test]
    fn test_preview_limits_rows() {
        let text = preview(&dataset(), 2);
        // Header plus two rows
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("tacoma-30000"));
        assert!(!text.contains("4runner-35000"));
    }
}
