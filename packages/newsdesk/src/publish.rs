//! Write-back of verification results.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::traits::store::{bounded, ArticleStore};
use crate::types::verification::{VerificationResult, VerificationSnapshot};

/// Persists verification results to the article store.
///
/// A failed write is logged and reported as `false`; the caller keeps the
/// result it already computed.
#[derive(Clone)]
pub struct ResultPublisher {
    store: Arc<dyn ArticleStore>,
    timeout: Duration,
}

impl ResultPublisher {
    pub fn new(store: Arc<dyn ArticleStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Write the canonical snapshot of `result` to `record_id`.
    pub async fn persist(&self, record_id: &str, result: &VerificationResult) -> bool {
        let snapshot = VerificationSnapshot::from(result);

        match bounded(self.timeout, self.store.save_verification(record_id, &snapshot)).await {
            Ok(()) => {
                debug!(record_id, status = %snapshot.status, "Verification saved");
                true
            }
            Err(e) => {
                error!(record_id, error = %e, "Failed to save verification result");
                false
            }
        }
    }
}
