//! Song use case, the orchestration layer between transport and persistence.
//!
//! Pure delegation today; this is the seam where cross-cutting concerns
//! (validation, authorization, caching) would be added. Errors propagate
//! unchanged from the store.

use crate::song_store::{Song, SongFilter, SongStore, StoreError};
use std::sync::Arc;

pub struct SongUseCase {
    store: Arc<dyn SongStore>,
}

impl SongUseCase {
    pub fn new(store: Arc<dyn SongStore>) -> Self {
        SongUseCase { store }
    }

    pub fn fetch_all(
        &self,
        filter: &SongFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Song>, StoreError> {
        self.store.fetch_all(filter, limit, offset)
    }

    pub fn fetch_by_id(&self, id: i64) -> Result<Song, StoreError> {
        self.store.fetch_by_id(id)
    }

    pub fn add_new_song(&self, song: &Song) -> Result<i64, StoreError> {
        self.store.store(song)
    }

    pub fn update_song(&self, song: &Song) -> Result<(), StoreError> {
        self.store.update(song)
    }

    pub fn delete_song(&self, id: i64) -> Result<(), StoreError> {
        self.store.delete(id)
    }
}
