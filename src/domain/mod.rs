pub mod app_config;
pub mod chart;
pub mod country;
pub mod error;
pub mod statistics;
