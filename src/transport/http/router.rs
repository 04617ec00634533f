use crate::domain::song::{Song, SongPatch};
use crate::transport::http::handlers::{health, songs};
use crate::transport::http::types::{
    CreateSongRequest, CreateSongResponse, ErrorResponse, HealthResponse, MessageResponse,
};
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Song Library API", description = "Song catalog with metadata enrichment"),
    paths(
        health::healthcheck_handler,
        songs::list_songs_handler,
        songs::create_song_handler,
        songs::get_verses_handler,
        songs::update_song_handler,
        songs::delete_song_handler
    ),
    components(schemas(
        Song,
        SongPatch,
        CreateSongRequest,
        CreateSongResponse,
        MessageResponse,
        ErrorResponse,
        HealthResponse
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/songs",
            get(songs::list_songs_handler).post(songs::create_song_handler),
        )
        .route("/songs/:id/verses", get(songs::get_verses_handler))
        .route(
            "/songs/:id",
            put(songs::update_song_handler).delete(songs::delete_song_handler),
        )
        .with_state(app_state)
}
