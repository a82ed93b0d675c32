// src/input/mod.rs
pub mod distribution;

pub use distribution::prompt_distribution;
