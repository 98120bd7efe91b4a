//! Corpus-wide recategorization: preview, execute, distribution.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{debug, info, instrument, warn};

use crate::classify::classifier::Classifier;
use crate::error::StoreResult;
use crate::traits::store::{bounded, ArticleStore};
use crate::types::article::{ArticleRecord, CategoryUpdate};
use crate::types::classification::{
    title_case, CategoryChange, ClassificationPreview, ClassificationRun, DistributionReport,
};

/// Items processed by [`Recategorizer::execute`] when no size is given.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Keywords written back with each updated label.
pub const TOP_KEYWORDS: usize = 5;

/// Error lines kept in a run report.
pub const MAX_ERROR_SAMPLES: usize = 10;

/// Change records kept in a run report.
pub const MAX_CHANGE_SAMPLES: usize = 25;

const SAMPLE_TITLE_CHARS: usize = 40;

/// Applies a [`Classifier`] across the stored corpus.
pub struct Recategorizer {
    classifier: Arc<Classifier>,
    store: Arc<dyn ArticleStore>,
    store_timeout: Duration,
}

impl Recategorizer {
    pub fn new(classifier: Arc<Classifier>, store: Arc<dyn ArticleStore>) -> Self {
        Self {
            classifier,
            store,
            store_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Read-only projection over the whole corpus.
    #[instrument(skip(self))]
    pub async fn preview(&self) -> StoreResult<ClassificationPreview> {
        let articles = bounded(self.store_timeout, self.store.list_articles()).await?;
        Ok(self.preview_corpus(&articles))
    }

    /// Project a recategorization of `articles` without writing anything.
    pub fn preview_corpus(&self, articles: &[ArticleRecord]) -> ClassificationPreview {
        let default_label = self.classifier.default_label();

        let mut current_distribution: IndexMap<String, usize> = IndexMap::new();
        let mut proposed_distribution: IndexMap<String, usize> = self
            .classifier
            .table()
            .labels()
            .map(|label| (title_case(label), 0))
            .collect();
        let mut would_change_count = 0;

        for article in articles {
            let current = article.stored_category(&default_label);
            *current_distribution.entry(current.to_string()).or_default() += 1;

            let result = self.classifier.classify_article(article);
            *proposed_distribution.entry(result.label()).or_default() += 1;

            if !same_label(current, &result.category) {
                would_change_count += 1;
            }
        }

        ClassificationPreview {
            total: articles.len(),
            current_distribution,
            proposed_distribution,
            would_change_count,
        }
    }

    /// Recategorize the first `batch_size` articles.
    ///
    /// Items are processed one at a time. A failed write is counted and
    /// sampled; it never aborts the batch or undoes earlier writes.
    #[instrument(skip(self))]
    pub async fn execute(&self, batch_size: usize) -> StoreResult<ClassificationRun> {
        let articles = bounded(self.store_timeout, self.store.list_articles()).await?;
        let total = articles.len();
        let default_label = self.classifier.default_label();

        let mut run = ClassificationRun::default();

        for article in articles.iter().take(batch_size) {
            let result = self.classifier.classify_article(article);
            let current = article.stored_category(&default_label);

            if same_label(current, &result.category) {
                run.unchanged_count += 1;
                continue;
            }

            let update = CategoryUpdate {
                category: result.label(),
                keywords: result.top_keywords(TOP_KEYWORDS),
                updated_at: Utc::now(),
            };

            match bounded(
                self.store_timeout,
                self.store.update_category(&article.id, &update),
            )
            .await
            {
                Ok(()) => {
                    debug!(
                        record_id = %article.id,
                        from = %current,
                        to = %update.category,
                        score = result.score,
                        "Recategorized article"
                    );
                    run.updated_count += 1;
                    *run
                        .transitions
                        .entry(format!("{} → {}", current, update.category))
                        .or_default() += 1;
                    if run.changes.len() < MAX_CHANGE_SAMPLES {
                        run.changes.push(CategoryChange {
                            record_id: article.id.clone(),
                            title: clip(&article.title, SAMPLE_TITLE_CHARS),
                            from: current.to_string(),
                            to: update.category,
                            score: result.score,
                        });
                    }
                }
                Err(e) => {
                    warn!(record_id = %article.id, error = %e, "Category update failed");
                    run.error_count += 1;
                    if run.error_samples.len() < MAX_ERROR_SAMPLES {
                        run.error_samples.push(format!("{}: {}", article.id, e));
                    }
                }
            }
        }

        run.remaining_count = total.saturating_sub(batch_size);

        info!(
            total,
            batch_size,
            updated = run.updated_count,
            unchanged = run.unchanged_count,
            errors = run.error_count,
            remaining = run.remaining_count,
            "Recategorization batch finished"
        );

        Ok(run)
    }

    /// Stored-label coverage of the corpus.
    #[instrument(skip(self))]
    pub async fn distribution(&self) -> StoreResult<DistributionReport> {
        let articles = bounded(self.store_timeout, self.store.list_articles()).await?;
        Ok(self.distribution_of(&articles))
    }

    pub fn distribution_of(&self, articles: &[ArticleRecord]) -> DistributionReport {
        let table = self.classifier.table();

        let mut no_category = 0;
        let mut category_counts: IndexMap<String, usize> = IndexMap::new();
        for article in articles {
            match article.category.as_deref().map(str::trim) {
                Some(label) if !label.is_empty() => {
                    *category_counts.entry(label.to_lowercase()).or_default() += 1;
                }
                _ => no_category += 1,
            }
        }

        let (matching_categories, non_matching_categories): (IndexMap<_, _>, IndexMap<_, _>) =
            category_counts
                .iter()
                .map(|(label, count)| (label.clone(), *count))
                .partition(|(label, _)| table.contains(label));

        let visible: usize = matching_categories.values().sum();

        DistributionReport {
            total: articles.len(),
            no_category,
            known_categories: table.labels().map(str::to_string).collect(),
            hidden: articles.len() - visible,
            visible,
            category_counts,
            matching_categories,
            non_matching_categories,
        }
    }
}

fn same_label(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn clip(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
