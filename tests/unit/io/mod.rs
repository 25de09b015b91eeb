pub mod error;
pub mod export;
