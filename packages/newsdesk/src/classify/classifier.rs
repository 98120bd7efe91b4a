//! Keyword-weighted category scoring.

use regex::{Regex, RegexBuilder};

use crate::classify::keywords::CategoryKeywordTable;
use crate::types::article::ArticleRecord;
use crate::types::classification::{ClassificationResult, ClassificationScore, KeywordMatch};

/// Occurrence weight in the title.
pub const TITLE_WEIGHT: u32 = 3;
/// Occurrence weight in the short identifier (slug).
pub const IDENTIFIER_WEIGHT: u32 = 2;
/// Weight per tag containing the keyword.
pub const TAG_WEIGHT: u32 = 2;
/// Occurrence weight in the body.
pub const BODY_WEIGHT: u32 = 1;

/// The text fields of an article that take part in scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleText<'a> {
    pub title: &'a str,
    pub identifier: &'a str,
    pub body: &'a str,
    pub tags: &'a [String],
}

impl<'a> From<&'a ArticleRecord> for ArticleText<'a> {
    fn from(article: &'a ArticleRecord) -> Self {
        Self {
            title: &article.title,
            identifier: &article.slug,
            body: &article.content,
            tags: &article.tags,
        }
    }
}

struct CompiledKeyword {
    keyword: String,
    pattern: Regex,
}

struct CompiledCategory {
    label: String,
    is_default: bool,
    keywords: Vec<CompiledKeyword>,
}

/// Scores articles against a [`CategoryKeywordTable`].
///
/// Keywords are escaped before compiling, so metacharacters in a keyword
/// (`c++`, `u.s.`) match literally.
pub struct Classifier {
    table: CategoryKeywordTable,
    categories: Vec<CompiledCategory>,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("default_category", &self.table.default_category())
            .field("categories", &self.categories.len())
            .finish()
    }
}

impl Classifier {
    /// Compile a classifier for `table`.
    pub fn new(table: CategoryKeywordTable) -> Result<Self, regex::Error> {
        let mut categories = Vec::with_capacity(table.len());
        for (label, keywords) in table.categories() {
            let keywords = keywords
                .iter()
                .map(|keyword| {
                    let pattern = RegexBuilder::new(&regex::escape(keyword))
                        .case_insensitive(true)
                        .build()?;
                    Ok(CompiledKeyword {
                        keyword: keyword.clone(),
                        pattern,
                    })
                })
                .collect::<Result<Vec<_>, regex::Error>>()?;

            categories.push(CompiledCategory {
                label: label.to_string(),
                is_default: label == table.default_category(),
                keywords,
            });
        }

        Ok(Self { table, categories })
    }

    /// Classifier over the built-in editorial table.
    pub fn editorial() -> Self {
        Self::new(CategoryKeywordTable::editorial())
            .expect("escaped editorial keywords always compile")
    }

    pub fn table(&self) -> &CategoryKeywordTable {
        &self.table
    }

    /// Title Case label of the default category.
    pub fn default_label(&self) -> String {
        crate::types::classification::title_case(self.table.default_category())
    }

    /// Score every category, in declaration order.
    pub fn score_all(&self, text: ArticleText<'_>) -> Vec<ClassificationScore> {
        self.categories
            .iter()
            .map(|category| score_category(category, text))
            .collect()
    }

    /// Pick the winning category.
    ///
    /// The highest-scoring non-default category wins when its score is
    /// above zero, the first declared one on a tie. Otherwise the default
    /// category wins, whatever its own score.
    pub fn classify(&self, text: ArticleText<'_>) -> ClassificationResult {
        let scores = self.score_all(text);

        let mut best: Option<usize> = None;
        for (idx, (score, category)) in scores.iter().zip(&self.categories).enumerate() {
            if category.is_default {
                continue;
            }
            if best.map_or(true, |b| score.score > scores[b].score) {
                best = Some(idx);
            }
        }

        let winner = match best {
            Some(idx) if scores[idx].score > 0 => Some(idx),
            _ => self.categories.iter().position(|c| c.is_default),
        };

        match winner {
            Some(idx) => {
                let score = &scores[idx];
                ClassificationResult {
                    category: score.category.clone(),
                    score: score.score,
                    matches: score.matches.clone(),
                    is_default: self.categories[idx].is_default,
                }
            }
            None => ClassificationResult {
                category: self.table.default_category().to_string(),
                score: 0,
                matches: Vec::new(),
                is_default: true,
            },
        }
    }

    pub fn classify_article(&self, article: &ArticleRecord) -> ClassificationResult {
        self.classify(ArticleText::from(article))
    }
}

fn score_category(category: &CompiledCategory, text: ArticleText<'_>) -> ClassificationScore {
    let mut score = ClassificationScore::empty(category.label.clone());

    for keyword in &category.keywords {
        let weight = keyword_weight(&keyword.pattern, text);
        if weight > 0 {
            score.score = score.score.saturating_add(weight);
            score.matches.push(KeywordMatch {
                keyword: keyword.keyword.clone(),
                weight,
            });
        }
    }

    score
}

fn keyword_weight(pattern: &Regex, text: ArticleText<'_>) -> u32 {
    let tag_hits = text.tags.iter().filter(|tag| pattern.is_match(tag)).count();

    weighted(count(pattern, text.title), TITLE_WEIGHT)
        .saturating_add(weighted(count(pattern, text.identifier), IDENTIFIER_WEIGHT))
        .saturating_add(weighted(tag_hits, TAG_WEIGHT))
        .saturating_add(weighted(count(pattern, text.body), BODY_WEIGHT))
}

fn count(pattern: &Regex, haystack: &str) -> usize {
    pattern.find_iter(haystack).count()
}

fn weighted(occurrences: usize, weight: u32) -> u32 {
    u32::try_from(occurrences)
        .unwrap_or(u32::MAX)
        .saturating_mul(weight)
}
