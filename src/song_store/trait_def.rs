use super::models::{Song, SongFilter};
use thiserror::Error;

/// Errors surfaced by song store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("song with id {0} not found")]
    NotFound(i64),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// Trait for song storage operations.
pub trait SongStore: Send + Sync {
    /// Fetch songs matching `filter`, paginated with `limit` and `offset`.
    /// Soft-deleted songs are excluded. Returns an empty vec when nothing
    /// matches. Output order is whatever the store returns; callers must
    /// not rely on it.
    fn fetch_all(
        &self,
        filter: &SongFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Song>, StoreError>;

    /// Fetch a single song by id. Soft-deleted songs remain fetchable here
    /// (with `is_deleted` set), so tombstones can still be inspected.
    fn fetch_by_id(&self, id: i64) -> Result<Song, StoreError>;

    /// Insert a new song and return the store-assigned id. The id carried
    /// by `song` is ignored.
    fn store(&self, song: &Song) -> Result<i64, StoreError>;

    /// Overwrite all mutable fields of the live song with `song.id`.
    /// Fails with `NotFound` when there is no live row for that id.
    fn update(&self, song: &Song) -> Result<(), StoreError>;

    /// Soft-delete the live song with `id`, stamping its modification time.
    /// Fails with `NotFound` when there is no live row for that id.
    fn delete(&self, id: i64) -> Result<(), StoreError>;
}
