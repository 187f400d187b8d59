pub mod chart;
pub mod config;
pub mod rest_countries;
pub mod storage;
pub mod table;
