use sqlx::SqlitePool;

use crate::profile::StoreHandle;
use crate::store::MenuStore;

/// Everything a screen session needs: the database pool and the profile
/// store handle. Cheap to clone; both members are handles.
#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    profile: StoreHandle,
}

impl AppState {
    pub fn new(pool: SqlitePool, profile: StoreHandle) -> Self {
        Self { pool, profile }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn menu_store(&self) -> MenuStore {
        MenuStore::new(self.pool.clone())
    }

    pub fn profile(&self) -> &StoreHandle {
        &self.profile
    }
}
