use std::time::Duration;

use tokio::sync::mpsc;

use crate::debounce::{QueryDebouncer, DEFAULT_QUIET_WINDOW};
use crate::error::AppResult;
use crate::filters::FilterState;
use crate::model::Section;
use crate::sections::to_sections;
use crate::store::MenuStore;

/// One screen's search pipeline: debounced free-text edits, immediate
/// category toggles, and the committed query text both paths share.
///
/// Text typed into the search box only becomes the committed query once its
/// burst survives the quiescence window; a category toggle recomputes right
/// away against the committed text, never against half-typed input. Dropping
/// the session tears the debouncer down and discards any pending trigger.
pub struct SearchSession {
    store: MenuStore,
    filters: FilterState,
    query: String,
    debouncer: QueryDebouncer,
    triggers: mpsc::UnboundedReceiver<String>,
}

impl SearchSession {
    /// Must be called from within a Tokio runtime (the debounce worker is
    /// spawned here).
    pub fn new(store: MenuStore) -> Self {
        Self::with_window(store, DEFAULT_QUIET_WINDOW)
    }

    pub fn with_window(store: MenuStore, window: Duration) -> Self {
        let (debouncer, triggers) = QueryDebouncer::spawn(window);
        Self {
            store,
            filters: FilterState::new(),
            query: String::new(),
            debouncer,
            triggers,
        }
    }

    /// The committed query text (not the raw keystroke stream).
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selections(&self) -> &[bool] {
        self.filters.selections()
    }

    /// Feed one keystroke's worth of search box state into the debouncer.
    pub fn type_text(&self, text: impl Into<String>) {
        self.debouncer.observe(text);
    }

    /// Flip one category chip and recompute immediately, bypassing the
    /// debounce window.
    pub async fn toggle_category(&mut self, index: usize) -> AppResult<Vec<Section>> {
        self.filters.toggle(index);
        self.run_query().await
    }

    /// Wait for the next debounced trigger, commit it as the query text and
    /// recompute. Returns `None` if the debounce worker is gone.
    pub async fn next_results(&mut self) -> Option<AppResult<Vec<Section>>> {
        let text = self.triggers.recv().await?;
        self.query = text;
        Some(self.run_query().await)
    }

    async fn run_query(&self) -> AppResult<Vec<Section>> {
        let records = self
            .store
            .query_filtered(&self.query, &self.filters.active_categories())
            .await?;
        Ok(to_sections(&records))
    }
}
