use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "used-cars")]
#[command(about = "Collects vehicle listings from paginated search results and caches them as CSV")]
#[command(version)]
pub struct Args {
    /// Dataset name; also names the cache file (<NAME>.csv)
    pub name: String,

    /// Vehicle make to search for
    #[arg(long)]
    pub make: String,

    /// Comma-separated models of the make, collected in the given order
    #[arg(long, value_delimiter = ',', required = true)]
    pub models: Vec<String>,

    /// Search radius in miles
    #[arg(long, default_value_t = 100)]
    pub max_distance: u32,

    /// ZIP code the search radius is centered on
    #[arg(long)]
    pub zip: u32,

    /// Listings per results page (defaults to the configured value)
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for cached datasets (overrides the configuration)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Ignore and replace any cached copy of the dataset
    #[arg(long)]
    pub refresh: bool,

    /// Number of rows to print after loading
    #[arg(long, default_value_t = 20)]
    pub preview: usize,
}
