//! Token reconciler.
//!
//! Prunes device tokens that failed delivery. Only tokens from the batch
//! just sent are ever removed, and nothing is ever added. The write is a
//! plain replace of the token list: two concurrent deliveries to the same
//! profile can overwrite each other's result.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;

use notifier_core::models::DeliveryReport;
use notifier_core::result::AppResult;
use notifier_core::traits::ProfileStore;
use notifier_core::types::UserId;

/// Computes and persists the surviving device tokens after a send.
#[derive(Debug, Clone)]
pub struct TokenReconciler {
    profiles: Arc<dyn ProfileStore>,
}

impl TokenReconciler {
    /// Creates a reconciler writing through `profiles`.
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Tokens that survive `report`, or `None` when nothing failed.
    ///
    /// Every occurrence of a token string that failed at some position is
    /// removed; the rest keep their order.
    pub fn surviving_tokens(submitted: &[String], report: &DeliveryReport) -> Option<Vec<String>> {
        let failed: HashSet<&str> = report
            .failed_positions()
            .filter_map(|idx| submitted.get(idx))
            .map(String::as_str)
            .collect();

        if failed.is_empty() {
            return None;
        }

        Some(
            submitted
                .iter()
                .filter(|token| !failed.contains(token.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// Persists the survivors for `user_id` if any token failed.
    ///
    /// Returns the number of tokens removed; zero means no write happened.
    pub async fn reconcile(
        &self,
        user_id: &UserId,
        submitted: &[String],
        report: &DeliveryReport,
    ) -> AppResult<usize> {
        let Some(survivors) = Self::surviving_tokens(submitted, report) else {
            return Ok(0);
        };

        let pruned = submitted.len() - survivors.len();
        self.profiles.set_device_tokens(user_id, &survivors).await?;

        info!(
            user_id = %user_id,
            pruned,
            remaining = survivors.len(),
            "Pruned undeliverable device tokens"
        );
        Ok(pruned)
    }
}
