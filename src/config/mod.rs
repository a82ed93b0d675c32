// src/config/mod.rs
pub mod settings;
pub mod dataset;

// Re-export commonly used types
pub use settings::Settings;
pub use dataset::{Dataset, Observation};
