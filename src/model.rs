use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqliteRow, Row};
use ts_rs::TS;

use crate::AppError;

/// Fixed category order used for section shaping. Categories outside this
/// list are stored but never surface in shaped output.
pub const CATEGORIES: [&str; 3] = ["starters", "mains", "desserts"];

/// One menu item as held in the local store. Immutable once stored; the only
/// write path is the full seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuRecord {
    /// Surrogate key, assigned sequentially from 1 at ingest time.
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    /// Price as display text; never parsed back into a number.
    pub price: String,
    pub description: String,
    /// Opaque image reference resolved by the display layer.
    pub image: String,
    pub category: String,
}

impl MenuRecord {
    pub fn from_row(row: SqliteRow) -> Result<Self, AppError> {
        Self::try_from(&row)
    }
}

impl TryFrom<&SqliteRow> for MenuRecord {
    type Error = AppError;

    fn try_from(row: &SqliteRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.try_get("id").map_err(AppError::from)?,
            name: row.try_get("name").map_err(AppError::from)?,
            price: row.try_get("price").map_err(AppError::from)?,
            description: row.try_get("description").map_err(AppError::from)?,
            image: row.try_get("image").map_err(AppError::from)?,
            category: row.try_get("category").map_err(AppError::from)?,
        })
    }
}

/// One item as delivered by the remote catalog, before ids are assigned and
/// the price is coerced to text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMenuItem {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    pub category: String,
}

/// A display section: one known category plus its records in stored order.
/// Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub name: String,
    pub data: Vec<MenuRecord>,
}
