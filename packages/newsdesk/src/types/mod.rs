//! Domain types shared across the pipeline.

pub mod article;
pub mod classification;
pub mod config;
pub mod research;
pub mod verification;
