// Core pipeline exports
pub mod extractor;
pub mod query;

pub use extractor::{extract_total_time, describe_shape, ExtractError, BUS_ONLY_PATH_TYPES};
pub use query::{UpstreamQuery, SEARCH_TYPE_INTERCITY, SEARCH_PATH_TYPE_BUS};
