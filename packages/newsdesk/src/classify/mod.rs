//! Keyword-weighted category classification.
//!
//! - [`keywords`]: the curated per-category keyword tables
//! - [`classifier`]: per-article scoring and winner selection
//! - [`batch`]: corpus-wide preview, execute and distribution reports

pub mod batch;
pub mod classifier;
pub mod keywords;

pub use batch::{Recategorizer, DEFAULT_BATCH_SIZE};
pub use classifier::{ArticleText, Classifier};
pub use keywords::CategoryKeywordTable;
