//! Infrastructure layer - Config file and JSON persistence

pub mod config;
pub mod repository;

pub use config::{Config, Settings};
pub use repository::{JsonFileRepository, PayloadRepository};
