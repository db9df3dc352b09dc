use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::filters::CategoryFilter;
use crate::model::Section;
use crate::sections::to_sections;
use crate::state::AppState;
use crate::sync::{seed_if_needed, MenuSource};

/// Row count and emptiness of the local menu cache, for the status surface.
#[derive(Debug, Clone, Serialize)]
pub struct MenuStatus {
    pub rows: i64,
    pub empty: bool,
}

/// Cold-start entry point for the screen layer: seed the cache if needed and
/// hand back the catalog already shaped into sections.
pub async fn load_menu_command<S: MenuSource>(
    state: &AppState,
    source: &S,
) -> AppResult<Vec<Section>> {
    let records = seed_if_needed(&state.menu_store(), source)
        .await
        .map_err(|err| err.with_context("command", "load_menu"))?;
    Ok(to_sections(&records))
}

/// One-shot filtered query, shaped for display.
pub async fn search_menu_command(
    state: &AppState,
    text: &str,
    categories: &CategoryFilter,
) -> AppResult<Vec<Section>> {
    let records = state
        .menu_store()
        .query_filtered(text, categories)
        .await
        .map_err(|err| err.with_context("command", "search_menu"))?;
    Ok(to_sections(&records))
}

pub async fn menu_status_command(state: &AppState) -> AppResult<MenuStatus> {
    let store = state.menu_store();
    let rows = store
        .count()
        .await
        .map_err(|err| err.with_context("command", "menu_status"))?;
    Ok(MenuStatus {
        rows,
        empty: rows == 0,
    })
}

pub fn profile_get_command(state: &AppState, key: &str) -> Option<String> {
    state.profile().get(key)
}

pub fn profile_set_command(state: &AppState, key: &str, value: &str) -> AppResult<()> {
    let store = state.profile();
    store.set(key, value);
    store.save().map_err(|err| {
        AppError::from(err)
            .with_context("command", "profile_set")
            .with_context("key", key.to_string())
    })
}
