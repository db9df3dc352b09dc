use futures::FutureExt;
use sqlx::SqlitePool;

use crate::db::run_in_tx;
use crate::error::{AppError, AppResult};
use crate::filters::CategoryFilter;
use crate::model::MenuRecord;

const MENU_TABLE_SQL: &str = "\
CREATE TABLE IF NOT EXISTS menu_items (
  id          INTEGER PRIMARY KEY,
  name        TEXT NOT NULL CHECK (length(name) > 0),
  price       TEXT NOT NULL,
  description TEXT NOT NULL DEFAULT '',
  image       TEXT NOT NULL DEFAULT '',
  category    TEXT NOT NULL
)";

const MENU_CATEGORY_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS menu_items_category_idx ON menu_items(category)";

const MENU_COLUMNS: &str = "id, name, price, description, image, category";

/// The local menu cache. Single source of truth for what is on the menu:
/// seeded once from the remote catalog, then queried read-only.
#[derive(Clone)]
pub struct MenuStore {
    pool: SqlitePool,
}

impl MenuStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the menu table and its category index if absent. Safe to call
    /// on every cold start; repeat calls are no-ops.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        for statement in [MENU_TABLE_SQL, MENU_CATEGORY_INDEX_SQL] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|err| {
                    AppError::from(err)
                        .with_context("operation", "ensure_schema")
                        .with_context("table", "menu_items")
                })?;
        }
        Ok(())
    }

    pub async fn is_empty(&self) -> AppResult<bool> {
        let (exists,): (i64,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM menu_items)")
            .fetch_one(&self.pool)
            .await
            .map_err(|err| AppError::from(err).with_context("operation", "is_empty"))?;
        Ok(exists == 0)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await
            .map_err(|err| AppError::from(err).with_context("operation", "count"))?;
        Ok(count)
    }

    /// Insert the whole batch inside one transaction: all rows or none. A
    /// failed seed must leave `is_empty()` true so a later attempt can retry.
    pub async fn bulk_insert(&self, records: &[MenuRecord]) -> AppResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        // The tx closure outlives this borrow, so it takes an owned batch.
        let rows = records.len();
        let records = records.to_vec();

        run_in_tx(&self.pool, move |tx| {
            async move {
                for record in &records {
                    sqlx::query(
                        "INSERT INTO menu_items (id, name, price, description, image, category)
                         VALUES (?, ?, ?, ?, ?, ?)",
                    )
                    .bind(record.id)
                    .bind(&record.name)
                    .bind(&record.price)
                    .bind(&record.description)
                    .bind(&record.image)
                    .bind(&record.category)
                    .execute(&mut **tx)
                    .await
                    .map_err(|err| {
                        AppError::from(err)
                            .with_context("operation", "bulk_insert")
                            .with_context("id", record.id.to_string())
                    })?;
                }
                Ok::<_, AppError>(())
            }
            .boxed()
        })
        .await?;

        tracing::debug!(
            target: "limone",
            event = "menu_bulk_insert",
            rows
        );
        Ok(())
    }

    /// Case-insensitive substring match on `name`, restricted to the given
    /// categories unless the filter is the match-all marker. Stable order by
    /// ascending id.
    pub async fn query_filtered(
        &self,
        text: &str,
        categories: &CategoryFilter,
    ) -> AppResult<Vec<MenuRecord>> {
        let category_list = match categories {
            CategoryFilter::All => None,
            // An explicit empty selection matches nothing; it is not the
            // identity filter.
            CategoryFilter::Only(list) if list.is_empty() => return Ok(Vec::new()),
            CategoryFilter::Only(list) => Some(list),
        };

        let mut sql = format!(
            "SELECT {MENU_COLUMNS} FROM menu_items WHERE name LIKE ? ESCAPE '\\'"
        );
        if let Some(list) = category_list {
            sql.push_str(" AND category IN (");
            sql.push_str(&vec!["?"; list.len()].join(", "));
            sql.push(')');
        }
        sql.push_str(" ORDER BY id ASC");

        let mut query = sqlx::query(&sql).bind(like_contains(text));
        if let Some(list) = category_list {
            for category in list {
                query = query.bind(category);
            }
        }

        let rows = query.fetch_all(&self.pool).await.map_err(|err| {
            AppError::from(err)
                .with_context("operation", "query_filtered")
                .with_context("table", "menu_items")
        })?;

        rows.into_iter()
            .map(|row| {
                MenuRecord::from_row(row)
                    .map_err(|err| err.with_context("operation", "query_filtered"))
            })
            .collect()
    }
}

/// Build a `LIKE` pattern that matches `text` as a literal substring. SQLite
/// LIKE folds ASCII case by default, which is the match rule the search box
/// relies on.
fn like_contains(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
