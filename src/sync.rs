use std::future::Future;

use thiserror::Error;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::filters::CategoryFilter;
use crate::model::{MenuRecord, RawMenuItem};
use crate::store::MenuStore;

/// Where raw menu items come from. Production uses the HTTP catalog; tests
/// swap in canned sources.
pub trait MenuSource {
    fn fetch_menu(
        &self,
    ) -> impl Future<Output = Result<Vec<RawMenuItem>, SourceError>> + Send;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("remote request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote payload invalid: {0}")]
    Payload(#[from] serde_json::Error),
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        let cause = match err {
            SourceError::Transport(inner) => AppError::from(inner),
            SourceError::Payload(inner) => AppError::from(inner),
        };
        AppError::new("SYNC/FETCH_FAILED", "Remote menu fetch failed").with_cause(cause)
    }
}

/// Assign sequential ids from 1 and coerce the numeric price to display
/// text. Every other field is carried over untouched.
pub fn normalize(raw: Vec<RawMenuItem>) -> Vec<MenuRecord> {
    raw.into_iter()
        .enumerate()
        .map(|(index, item)| MenuRecord {
            id: index as i64 + 1,
            name: item.name,
            price: item.price.to_string(),
            description: item.description,
            image: item.image,
            category: item.category,
        })
        .collect()
}

/// Cold-start entry point. Ensures the schema, then either serves the full
/// cached catalog or, when the store is empty, pulls the remote catalog,
/// normalizes it and seeds the store in one shot.
///
/// A failing source leaves the store empty: the fault carries the underlying
/// cause and the next call simply retries the fetch.
pub async fn seed_if_needed<S: MenuSource>(
    store: &MenuStore,
    source: &S,
) -> AppResult<Vec<MenuRecord>> {
    store.ensure_schema().await?;

    if !store.is_empty().await? {
        let cached = store.query_filtered("", &CategoryFilter::All).await?;
        info!(
            target: "limone",
            event = "menu_cache_hit",
            rows = cached.len()
        );
        return Ok(cached);
    }

    let raw = source.fetch_menu().await.map_err(AppError::from)?;
    let records = normalize(raw);
    store.bulk_insert(&records).await?;
    info!(
        target: "limone",
        event = "menu_seeded",
        rows = records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, price: f64, category: &str) -> RawMenuItem {
        RawMenuItem {
            name: name.to_string(),
            price,
            description: format!("{name} description"),
            image: format!("{name}.jpg"),
            category: category.to_string(),
        }
    }

    #[test]
    fn normalize_assigns_sequential_ids_from_one() {
        let records = normalize(vec![
            raw("Greek Salad", 12.99, "starters"),
            raw("Pasta", 6.99, "mains"),
            raw("Lemon Dessert", 4.99, "desserts"),
        ]);
        assert_eq!(
            records.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(records[0].name, "Greek Salad");
        assert_eq!(records[0].category, "starters");
        assert_eq!(records[0].description, "Greek Salad description");
        assert_eq!(records[0].image, "Greek Salad.jpg");
    }

    #[test]
    fn normalize_renders_prices_as_display_text() {
        let records = normalize(vec![
            raw("a", 12.99, "mains"),
            raw("b", 10.0, "mains"),
            raw("c", 2.5, "mains"),
        ]);
        let prices: Vec<&str> = records.iter().map(|r| r.price.as_str()).collect();
        assert_eq!(prices, vec!["12.99", "10", "2.5"]);
    }

    #[test]
    fn normalize_of_nothing_is_nothing() {
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn source_error_becomes_a_sync_fault_with_cause() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let fault = AppError::from(SourceError::Payload(json_err));
        assert_eq!(fault.code(), "SYNC/FETCH_FAILED");
        let cause = fault.cause().expect("cause preserved");
        assert_eq!(cause.code(), "JSON/SYNTAX");
    }
}
