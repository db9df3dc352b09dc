#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

use limone_lib::{MenuRecord, MenuStore};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub async fn temp_pool() -> SqlitePool {
    // One connection holds the :memory: database alive for the whole test;
    // no reaper timers, so paused-clock tests never advance into them.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("connect sqlite::memory:");
    sqlx::query("PRAGMA foreign_keys=ON;")
        .execute(&pool)
        .await
        .unwrap();
    pool
}

pub async fn temp_store() -> MenuStore {
    let store = MenuStore::new(temp_pool().await);
    store.ensure_schema().await.expect("create menu schema");
    store
}

pub fn record(id: i64, name: &str, price: &str, category: &str) -> MenuRecord {
    MenuRecord {
        id,
        name: name.to_string(),
        price: price.to_string(),
        description: format!("{name} from the Limone kitchen"),
        image: format!("{}.jpg", name.to_lowercase().replace(' ', "-")),
        category: category.to_string(),
    }
}

pub fn sample_menu() -> Vec<MenuRecord> {
    vec![
        record(1, "Greek Salad", "12.99", "starters"),
        record(2, "Bruschetta", "5.99", "starters"),
        record(3, "Grilled Fish", "20", "mains"),
        record(4, "Pasta", "6.99", "mains"),
        record(5, "Lemon Dessert", "4.99", "desserts"),
    ]
}
