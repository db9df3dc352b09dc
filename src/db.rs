use anyhow::{Context, Result as AnyResult};
use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite, Transaction};
use std::path::Path;

/// Open the menu database, creating the file and its parent directory on
/// first use. WAL + synchronous=FULL, with the per-connection pragmas applied
/// on every checkout.
pub async fn open_menu_pool(db_path: &Path) -> AnyResult<Pool<Sqlite>> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            tracing::error!(
                target = "limone",
                error = %e,
                event = "data_dir_create_failed",
                path = %parent.display()
            );
            e
        })?;
    }
    tracing::info!(target = "limone", event = "db_path", path = %db_path.display());

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Full);

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .after_connect(|conn, _| {
            Box::pin(async move {
                for pragma in [
                    "PRAGMA foreign_keys=ON;",
                    "PRAGMA busy_timeout = 5000;",
                    "PRAGMA wal_autocheckpoint = 1000;",
                ] {
                    sqlx::query(pragma).execute(&mut *conn).await?;
                }
                Ok(())
            })
        })
        .connect_with(options)
        .await
        .with_context(|| format!("open sqlite database at {}", db_path.display()))?;

    log_effective_pragmas(&pool).await;

    Ok(pool)
}

async fn scalar<T>(pool: &Pool<Sqlite>, sql: &str, fallback: T) -> T
where
    T: Send + Unpin + sqlx::Type<Sqlite> + for<'r> sqlx::Decode<'r, Sqlite>,
{
    sqlx::query_scalar(sql).fetch_one(pool).await.unwrap_or(fallback)
}

/// What actually took effect can differ from what was requested (journal mode
/// in particular), so read the pragmas back and log them.
async fn log_effective_pragmas(pool: &Pool<Sqlite>) {
    use tracing::{info, warn};

    let sqlite_version: String = scalar(pool, "select sqlite_version()", "unknown".into()).await;
    let journal_mode: String = scalar(pool, "PRAGMA journal_mode;", "unknown".into()).await;
    let synchronous: i64 = scalar(pool, "PRAGMA synchronous;", i64::MIN).await;
    let busy_timeout: i64 = scalar(pool, "PRAGMA busy_timeout;", i64::MIN).await;

    info!(
        target: "limone",
        event = "db_open",
        sqlite_version = %sqlite_version,
        journal_mode = %journal_mode,
        synchronous = %synchronous,
        busy_timeout_ms = %busy_timeout
    );

    if !journal_mode.eq_ignore_ascii_case("wal") {
        warn!(
            target = "limone",
            event = "db_open_warning",
            msg = "journal_mode != WAL; running with reduced crash safety"
        );
    }
}

/// Run work inside a transaction. Commits on success, rolls back on error.
pub async fn run_in_tx<R, E, F>(pool: &Pool<Sqlite>, f: F) -> Result<R, E>
where
    E: From<sqlx::Error>,
    F: for<'c> FnOnce(&'c mut Transaction<'static, Sqlite>) -> BoxFuture<'c, Result<R, E>>,
{
    use tracing::{debug, error, warn};

    let mut tx = pool.begin().await.map_err(E::from)?;
    debug!(target = "limone", event = "db_tx_begin");
    match f(&mut tx).await {
        Ok(val) => {
            tx.commit().await.map_err(E::from)?;
            debug!(target = "limone", event = "db_tx_commit");
            Ok(val)
        }
        Err(e) => {
            if let Err(rb) = tx.rollback().await {
                error!(target = "limone", event = "db_tx_rollback_failed", error = %rb);
            } else {
                warn!(target = "limone", event = "db_tx_rollback");
            }
            Err(e)
        }
    }
}
