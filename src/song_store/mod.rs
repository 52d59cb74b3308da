//! Song store module.
//!
//! This module provides the `SqliteSongStore` for persisting the songs
//! catalog, plus the `SongStore` trait the rest of the service depends on.

mod models;
mod schema;
mod store;
mod trait_def;

pub use models::{Song, SongFilter};
pub use schema::SONGS_VERSIONED_SCHEMAS;
pub use store::SqliteSongStore;
pub use trait_def::{SongStore, StoreError};
