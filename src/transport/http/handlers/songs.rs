use crate::domain::error::SongError;
use crate::domain::pagination::Page;
use crate::domain::song::{Song, SongFilter, SongPatch};
use crate::transport::http::handlers::common::{parse_id_filter, parse_song_id, ApiError};
use crate::transport::http::types::{
    AppState, CreateSongRequest, CreateSongResponse, ErrorResponse, ListSongsQuery,
    MessageResponse, PageQuery,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::warn;

#[utoipa::path(
    get,
    path = "/songs",
    params(ListSongsQuery),
    responses(
        (status = 200, description = "Songs matching the filters", body = [Song]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_songs_handler(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Song>>, ApiError> {
    let query = ListSongsQuery::from_pairs(&pairs);
    let filter = SongFilter {
        group: query.group.unwrap_or_default(),
        name: query.name.unwrap_or_default(),
        id: parse_id_filter(query.id.as_deref()),
    };
    let page = Page::from_query(query.page.as_deref(), query.page_size.as_deref());

    let songs = state.song_service.filter_songs(&filter, page).await?;
    Ok(Json(songs))
}

#[utoipa::path(
    post,
    path = "/songs",
    request_body = CreateSongRequest,
    responses(
        (status = 200, description = "Song enriched and stored", body = CreateSongResponse),
        (status = 400, description = "Missing group/song or malformed JSON", body = ErrorResponse),
        (status = 500, description = "Provider or storage failure", body = ErrorResponse)
    )
)]
pub async fn create_song_handler(
    State(state): State<AppState>,
    request: Result<Json<CreateSongRequest>, JsonRejection>,
) -> Result<Json<CreateSongResponse>, ApiError> {
    let Json(request) = request.map_err(|e| {
        warn!(op = "http.create_song", error = %e, "failed to decode JSON");
        SongError::validation(format!("malformed JSON: {}", e))
    })?;
    let group = request.group.trim();
    let name = request.song.trim();
    if group.is_empty() || name.is_empty() {
        return Err(SongError::validation("group and song are required").into());
    }

    let song_id = state.song_service.create_song(group, name).await?;
    Ok(Json(CreateSongResponse { song_id }))
}

#[utoipa::path(
    get,
    path = "/songs/{id}/verses",
    params(
        ("id" = i64, Path, description = "Song id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of verses", body = [String]),
        (status = 400, description = "Bad id or no more verses", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_verses_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let query = PageQuery::from_pairs(&pairs);
    let id = parse_song_id(&id)?;
    let page = Page::from_query(query.page.as_deref(), query.page_size.as_deref());

    let verses = state
        .song_service
        .get_verses_with_pagination(id, page)
        .await?;
    Ok(Json(verses))
}

#[utoipa::path(
    put,
    path = "/songs/{id}",
    params(
        ("id" = i64, Path, description = "Song id")
    ),
    request_body(
        content = SongPatch,
        description = "Partial song, e.g. {\"text\": \"new text\", \"group\": \"Muse\"}"
    ),
    responses(
        (status = 200, description = "Song updated", body = MessageResponse),
        (status = 400, description = "Bad id, malformed JSON, invalid date or song not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn update_song_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    patch: Result<Json<SongPatch>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_song_id(&id)?;
    let Json(patch) = patch.map_err(|e| {
        warn!(op = "http.update_song", song_id = id, error = %e, "failed to decode JSON");
        SongError::validation(format!("malformed JSON: {}", e))
    })?;

    state.song_service.update_song(id, &patch).await?;
    Ok(Json(MessageResponse::new("song updated")))
}

#[utoipa::path(
    delete,
    path = "/songs/{id}",
    params(
        ("id" = i64, Path, description = "Song id")
    ),
    responses(
        (status = 200, description = "Song deleted", body = MessageResponse),
        (status = 400, description = "Bad id or song not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_song_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_song_id(&id)?;
    state.song_service.delete_song(id).await?;
    Ok(Json(MessageResponse::new("song deleted")))
}
