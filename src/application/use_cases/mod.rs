pub mod interpretation;
pub mod name_filter;
pub mod normalizer;
pub mod ranking;
pub mod statistics;
