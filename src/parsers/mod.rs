pub mod html;
pub mod listing;

#[cfg(test)]
mod tests;

pub use listing::ListingExtractor;
