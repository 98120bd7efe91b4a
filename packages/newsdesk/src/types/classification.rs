//! Classification scores and batch reports.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Weighted contribution of one keyword to a category score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub weight: u32,
}

/// Score of a single category against one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationScore {
    /// Category label as declared in the keyword table (lower case).
    pub category: String,
    pub score: u32,
    /// Keywords with a nonzero contribution, in declaration order.
    pub matches: Vec<KeywordMatch>,
}

impl ClassificationScore {
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            score: 0,
            matches: Vec::new(),
        }
    }

    pub fn matched_keywords(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.keyword.as_str()).collect()
    }
}

/// The winning category for one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub category: String,
    pub score: u32,
    pub matches: Vec<KeywordMatch>,
    /// True when the default category won by fallback or by being the only option.
    pub is_default: bool,
}

impl ClassificationResult {
    /// Title Case label as written back to the store.
    pub fn label(&self) -> String {
        title_case(&self.category)
    }

    pub fn matched_keywords(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.keyword.as_str()).collect()
    }

    /// The `n` strongest keywords; equal weights keep declaration order.
    pub fn top_keywords(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<&KeywordMatch> = self.matches.iter().collect();
        ranked.sort_by(|a, b| b.weight.cmp(&a.weight));
        ranked
            .into_iter()
            .take(n)
            .map(|m| m.keyword.clone())
            .collect()
    }
}

/// Uppercase the first character, lowercase the rest.
pub fn title_case(label: &str) -> String {
    let mut chars = label.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Read-only projection of a recategorization pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationPreview {
    pub total: usize,
    /// Stored labels as found, missing labels counted under the default.
    pub current_distribution: IndexMap<String, usize>,
    /// Proposed Title Case labels; every table category is listed.
    pub proposed_distribution: IndexMap<String, usize>,
    pub would_change_count: usize,
}

/// One recorded label change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChange {
    pub record_id: String,
    /// Title clipped to 40 characters.
    pub title: String,
    pub from: String,
    pub to: String,
    pub score: u32,
}

/// Outcome of an executed recategorization batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationRun {
    pub updated_count: usize,
    pub unchanged_count: usize,
    pub error_count: usize,
    /// At most ten `"<id>: <error>"` lines.
    pub error_samples: Vec<String>,
    /// Sampled before/after pairs.
    pub changes: Vec<CategoryChange>,
    /// `"Old → New"` → count, over every update in the batch.
    pub transitions: IndexMap<String, usize>,
    /// `total - batch_size`, floored at zero.
    pub remaining_count: usize,
}

/// Category coverage of the stored corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionReport {
    pub total: usize,
    pub no_category: usize,
    /// Lower-cased stored label → count.
    pub category_counts: IndexMap<String, usize>,
    /// Labels declared in the keyword table, in declaration order.
    pub known_categories: Vec<String>,
    pub matching_categories: IndexMap<String, usize>,
    pub non_matching_categories: IndexMap<String, usize>,
    /// Items carrying a known label.
    pub visible: usize,
    /// Items with an unknown label or none.
    pub hidden: usize,
}
