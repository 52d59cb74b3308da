//! Music Library Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod server;
pub mod song_store;
pub mod sqlite_persistence;
pub mod usecase;

// Re-export commonly used types for convenience
pub use server::{run_server, RequestsLoggingLevel};
pub use song_store::{Song, SongFilter, SongStore, SqliteSongStore, StoreError};
pub use usecase::SongUseCase;
