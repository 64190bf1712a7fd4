pub mod config;

pub use config::{AppConfig, RunSettings};
