/// Command-line interface and run orchestration
pub mod cli;
/// Configuration file parsing and validation
pub mod config_loader;
/// Generation policy constants
pub mod configuration;
/// Error types
pub mod error;
/// Text export format
pub mod export;
/// PNG rendering
pub mod image;
