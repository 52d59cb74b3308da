use axum::extract::FromRef;

use crate::usecase::SongUseCase;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedSongUseCase = Arc<SongUseCase>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub use_case: GuardedSongUseCase,
}

impl FromRef<ServerState> for GuardedSongUseCase {
    fn from_ref(input: &ServerState) -> Self {
        input.use_case.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
