pub mod use_cases;

pub use use_cases::interpretation::interpret;
pub use use_cases::name_filter::filter_by_name;
pub use use_cases::normalizer::{normalize_countries, NormalizedBatch};
pub use use_cases::ranking::top_by_field;
pub use use_cases::statistics::StatisticsEngine;
