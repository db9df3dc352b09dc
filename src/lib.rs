//! Menu cache-and-query engine for the Limone storefront app.
//!
//! The engine owns one decision and three transforms: fetch the remote
//! catalog or serve from the local SQLite cache; normalize raw catalog items
//! into stored records; answer free-text + category queries against the
//! cache; and shape flat records into ordered display sections. A debounced
//! search session keeps rapid keystrokes from turning into query storms.
//!
//! The screen layer drives everything through [`commands`] (one-shot calls)
//! or [`SearchSession`] (the live search pipeline). Remote transport and
//! profile storage are collaborators behind narrow seams: [`MenuSource`] and
//! [`profile::StoreHandle`].

pub mod commands;
pub mod db;
pub mod debounce;
pub mod error;
pub mod filters;
pub mod logging;
pub mod model;
pub mod profile;
pub mod remote;
pub mod sections;
pub mod session;
pub mod state;
pub mod store;
pub mod sync;

pub use error::{AppError, AppResult};
pub use filters::{CategoryFilter, FilterState};
pub use model::{MenuRecord, RawMenuItem, Section, CATEGORIES};
pub use remote::HttpMenuSource;
pub use sections::to_sections;
pub use session::SearchSession;
pub use state::AppState;
pub use store::MenuStore;
pub use sync::{normalize, seed_if_needed, MenuSource, SourceError};
