// Path: crates/app/src/search.rs

use learnchain_api::BackendApi;
use learnchain_types::config::ClientConfig;
use learnchain_types::SearchResults;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// What happened to one keystroke.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Empty input; results were cleared without a request.
    Cleared,
    /// A newer keystroke arrived during the debounce window; no request was made.
    Superseded,
    /// The request completed after a newer keystroke and was discarded.
    Stale,
    /// The response became the current results.
    Applied,
    Failed(String),
}

/// Debounced search-as-you-type.
///
/// Each call to [`SearchController::input`] takes the next generation number. Only the
/// holder of the latest generation may send a request after the debounce window, and
/// only a response whose generation is still the latest replaces the results. The
/// controller is `Send + Sync`, so keystrokes can be spawned as independent tasks.
pub struct SearchController {
    backend: Arc<dyn BackendApi>,
    debounce: Duration,
    /// `None` keeps every result.
    top_n: Option<usize>,
    generation: AtomicU64,
    results: Mutex<SearchResults>,
}

impl SearchController {
    /// A dropdown controller that keeps the first `top_n` courses and bundles.
    pub fn new(backend: Arc<dyn BackendApi>, debounce: Duration, top_n: usize) -> Self {
        Self::with_limit(backend, debounce, Some(top_n))
    }

    /// Keeps the whole response, for the full result page.
    pub fn unbounded(backend: Arc<dyn BackendApi>, debounce: Duration) -> Self {
        Self::with_limit(backend, debounce, None)
    }

    fn with_limit(backend: Arc<dyn BackendApi>, debounce: Duration, top_n: Option<usize>) -> Self {
        Self {
            backend,
            debounce,
            top_n,
            generation: AtomicU64::new(0),
            results: Mutex::new(SearchResults::default()),
        }
    }

    pub fn from_config(backend: Arc<dyn BackendApi>, config: &ClientConfig) -> Self {
        Self::new(backend, config.search_debounce(), config.search.top_n)
    }

    fn slot(&self) -> MutexGuard<'_, SearchResults> {
        self.results.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub fn results(&self) -> SearchResults {
        self.slot().clone()
    }

    pub async fn input(&self, text: &str) -> SearchOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = text.trim();
        if query.is_empty() {
            *self.slot() = SearchResults::default();
            return SearchOutcome::Cleared;
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_latest(generation) {
            return SearchOutcome::Superseded;
        }

        tracing::debug!(target: "search", generation, query, "searching");
        match self.backend.search(query).await {
            Ok(found) => {
                let mut results = self.slot();
                // Checked under the lock so a concurrent clear cannot be overwritten.
                if !self.is_latest(generation) {
                    tracing::debug!(target: "search", generation, "dropping stale response");
                    return SearchOutcome::Stale;
                }
                *results = match self.top_n {
                    Some(n) => found.top(n),
                    None => found,
                };
                SearchOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(target: "search", query, error = %e, "search failed");
                if self.is_latest(generation) {
                    SearchOutcome::Failed(e.to_string())
                } else {
                    SearchOutcome::Stale
                }
            }
        }
    }
}
