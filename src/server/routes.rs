use anyhow::Result;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::error;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, state::*, ServerConfig};
use crate::song_store::{Song, SongFilter, StoreError};
use crate::usecase::SongUseCase;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
struct SongsQuery {
    group: Option<String>,
    song: Option<String>,
    #[serde(default = "default_limit")]
    limit: u32,
    #[serde(default)]
    offset: u32,
}

fn default_limit() -> u32 {
    10
}

impl SongsQuery {
    /// Empty query values impose no constraint, same as absent ones.
    fn filter(&self) -> SongFilter {
        SongFilter {
            group: self.group.clone().filter(|s| !s.is_empty()),
            song: self.song.clone().filter(|s| !s.is_empty()),
        }
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
}

fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
        StoreError::Storage(_) => {
            error!("Storage error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
    };
    Json(stats)
}

async fn fetch_all_songs(
    State(use_case): State<GuardedSongUseCase>,
    query: Result<Query<SongsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match use_case.fetch_all(&query.filter(), query.limit, query.offset) {
        Ok(songs) => Json(songs).into_response(),
        Err(err) => store_error_response(err),
    }
}

async fn fetch_song(
    State(use_case): State<GuardedSongUseCase>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match use_case.fetch_by_id(id) {
        Ok(song) => Json(song).into_response(),
        Err(err) => store_error_response(err),
    }
}

async fn add_song(
    State(use_case): State<GuardedSongUseCase>,
    body: Result<Json<Song>, JsonRejection>,
) -> Response {
    let Json(song) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match use_case.add_new_song(&song) {
        Ok(_id) => (
            StatusCode::CREATED,
            Json(StatusResponse {
                status: "song added",
            }),
        )
            .into_response(),
        Err(err) => store_error_response(err),
    }
}

async fn update_song(
    State(use_case): State<GuardedSongUseCase>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Song>, JsonRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    let Json(mut song) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_request(rejection.body_text()),
    };
    // The path id is authoritative, any id in the body is ignored
    song.id = id;

    match use_case.update_song(&song) {
        Ok(()) => Json(StatusResponse {
            status: "song updated",
        })
        .into_response(),
        Err(err) => store_error_response(err),
    }
}

async fn delete_song(
    State(use_case): State<GuardedSongUseCase>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match use_case.delete_song(id) {
        Ok(()) => Json(StatusResponse {
            status: "song deleted",
        })
        .into_response(),
        Err(err) => store_error_response(err),
    }
}

pub fn make_app(config: ServerConfig, use_case: Arc<SongUseCase>) -> Router {
    let state = ServerState {
        config,
        start_time: Instant::now(),
        use_case,
    };

    Router::new()
        .route("/", get(home))
        .route("/songs", get(fetch_all_songs).post(add_song))
        .route(
            "/songs/{id}",
            get(fetch_song).put(update_song).delete(delete_song),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            log_requests,
        ))
        .with_state(state)
}

pub async fn run_server(config: ServerConfig, use_case: Arc<SongUseCase>) -> Result<()> {
    let port = config.port;
    let app = make_app(config, use_case);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}
