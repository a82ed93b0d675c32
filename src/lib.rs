// src/lib.rs
//! Distribution functions, histogram binning and sample statistics.
//!
//! The `analysis` module is the numeric engine: pure functions over plain
//! numbers and slices, with no I/O. `config` and `file` hold the settings and
//! dataset types and their loaders.

pub mod analysis;
pub mod config;
pub mod error;
pub mod file;
pub mod utils;

pub use error::{Result, StatsError};
