// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod csv_store;
pub mod generator;
pub mod http_source;
