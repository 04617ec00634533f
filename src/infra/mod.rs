pub mod config;
pub mod database;
pub mod enrichment;
pub mod logging;
