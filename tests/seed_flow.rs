use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use limone_lib::{seed_if_needed, to_sections, MenuSource, RawMenuItem, SourceError};

#[path = "util.rs"]
mod util;

fn raw(name: &str, price: f64, category: &str) -> RawMenuItem {
    RawMenuItem {
        name: name.to_string(),
        price,
        description: String::new(),
        image: String::new(),
        category: category.to_string(),
    }
}

/// Canned catalog that counts how often it is asked.
struct CountingSource {
    items: Vec<RawMenuItem>,
    calls: AtomicUsize,
}

impl CountingSource {
    fn new(items: Vec<RawMenuItem>) -> Self {
        Self {
            items,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MenuSource for CountingSource {
    async fn fetch_menu(&self) -> Result<Vec<RawMenuItem>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.clone())
    }
}

struct FailingSource;

impl MenuSource for FailingSource {
    async fn fetch_menu(&self) -> Result<Vec<RawMenuItem>, SourceError> {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        Err(SourceError::Payload(err))
    }
}

#[tokio::test]
async fn cold_start_seeds_and_shapes_the_menu() -> Result<()> {
    let store = util::temp_store().await;
    let source = CountingSource::new(vec![
        raw("Lemon Dessert", 4.99, "desserts"),
        raw("Greek Salad", 12.99, "starters"),
    ]);

    let records = seed_if_needed(&store, &source).await?;

    assert_eq!(source.calls(), 1);
    assert_eq!(store.count().await?, 2);
    assert_eq!(
        records.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(records[0].price, "4.99");
    assert_eq!(records[1].price, "12.99");

    // Ids follow feed order but sections still come out in display order.
    let sections = to_sections(&records);
    assert_eq!(
        sections.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["starters", "desserts"]
    );
    assert_eq!(sections[0].data[0].name, "Greek Salad");
    assert_eq!(sections[1].data[0].name, "Lemon Dessert");
    Ok(())
}

#[tokio::test]
async fn second_call_serves_the_cache_without_touching_the_remote() -> Result<()> {
    let store = util::temp_store().await;
    let source = CountingSource::new(vec![
        raw("Greek Salad", 12.99, "starters"),
        raw("Pasta", 6.99, "mains"),
    ]);

    let first = seed_if_needed(&store, &source).await?;
    let second = seed_if_needed(&store, &source).await?;

    assert_eq!(source.calls(), 1);
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn prepopulated_store_never_contacts_the_remote() -> Result<()> {
    let store = util::temp_store().await;
    store.bulk_insert(&util::sample_menu()).await?;
    let source = CountingSource::new(Vec::new());

    let records = seed_if_needed(&store, &source).await?;

    assert_eq!(source.calls(), 0);
    assert_eq!(records.len(), 5);
    assert_eq!(records, util::sample_menu());
    Ok(())
}

#[tokio::test]
async fn failed_fetch_leaves_the_store_empty_so_a_retry_can_seed() -> Result<()> {
    let store = util::temp_store().await;

    let fault = seed_if_needed(&store, &FailingSource).await.unwrap_err();
    assert_eq!(fault.code(), "SYNC/FETCH_FAILED");
    let cause = fault.cause().expect("fetch fault keeps its cause");
    assert_eq!(cause.code(), "JSON/SYNTAX");

    assert!(store.is_empty().await?);

    // Nothing was cached, so the next attempt goes back to the source.
    let source = CountingSource::new(vec![raw("Bruschetta", 5.99, "starters")]);
    let records = seed_if_needed(&store, &source).await?;
    assert_eq!(source.calls(), 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Bruschetta");
    Ok(())
}
