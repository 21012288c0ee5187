pub mod configuration;
mod errors;
pub mod location_store;
pub mod migrations;
pub mod repository;
