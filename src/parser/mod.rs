pub mod listing_parser;
pub mod strategy;

pub use listing_parser::{ListingParser, Parser, UNKNOWN_NAME};
pub use strategy::SelectorStrategy;
