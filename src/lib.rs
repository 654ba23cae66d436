pub mod api;
pub mod config;
pub mod humanize;
pub mod importer;
pub mod observability;
pub mod transport;
