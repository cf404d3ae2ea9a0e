use clap::Parser;
use std::process::ExitCode;
use used_cars::report::{self, Summary};
use used_cars::{Harvest, HarvestError};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!(
        "Loading dataset {:?}: {} {:?} within {} miles of {}",
        args.name,
        args.make,
        args.models,
        args.max_distance,
        args.zip
    );

    let mut harvest = Harvest::new(
        args.name.clone(),
        args.make.clone(),
        args.models.clone(),
        args.max_distance,
        args.zip,
    )
    .refresh(args.refresh);

    if let Some(path) = &args.config {
        harvest = match harvest.with_config_file(path) {
            Ok(h) => h,
            Err(e) => {
                ::log::error!("Failed to load configuration from {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };
    }
    if let Some(dir) = &args.cache_dir {
        harvest = harvest.with_cache_dir(dir);
    }
    if let Some(page_size) = args.page_size {
        harvest = harvest.with_page_size(page_size);
    }

    let start_time = std::time::Instant::now();
    let dataset = match harvest.load().await {
        Ok(dataset) => dataset,
        Err(HarvestError::IncompleteRun {
            collected,
            failures,
        }) => {
            for failure in &failures {
                ::log::error!(
                    "{}-{} stopped at page {}: {}",
                    failure.make,
                    failure.model,
                    failure.page,
                    failure.error
                );
            }
            ::log::error!(
                "Run incomplete; {} listings collected but not cached",
                collected.len()
            );
            return ExitCode::FAILURE;
        }
        Err(e) => {
            ::log::error!("Failed to load dataset: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Loaded {} listings ({:?}) in {:.2} seconds",
        dataset.len(),
        dataset.origin,
        start_time.elapsed().as_secs_f64()
    );

    print!("{}", report::preview(&dataset, args.preview));
    println!();
    print!("{}", Summary::from_dataset(&dataset));

    ExitCode::SUCCESS
}
