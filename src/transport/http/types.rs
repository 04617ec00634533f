use crate::app::SongService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone)]
pub struct AppState {
    pub song_service: Arc<SongService>,
}

impl AppState {
    pub fn new(song_service: SongService) -> Self {
        Self {
            song_service: Arc::new(song_service),
        }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct CreateSongRequest {
    #[serde(default)]
    pub group: String,
    /// Song title.
    #[serde(default)]
    pub song: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CreateSongResponse {
    pub song_id: i64,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// First value of `key` in a raw query string; repeated keys never reject the request.
fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

/// Query of `GET /songs`. Everything is kept as raw text so bad numbers fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSongsQuery {
    /// Case-insensitive substring of the group.
    pub group: Option<String>,
    /// Case-insensitive substring of the song title.
    pub name: Option<String>,
    /// Exact song id; ignored unless a positive integer.
    pub id: Option<String>,
    /// 1-indexed page, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub page_size: Option<String>,
}

impl ListSongsQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            group: first_value(pairs, "group"),
            name: first_value(pairs, "name"),
            id: first_value(pairs, "id"),
            page: first_value(pairs, "page"),
            page_size: first_value(pairs, "page_size"),
        }
    }
}

#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-indexed page, default 1.
    pub page: Option<String>,
    /// Page size, default 10.
    pub page_size: Option<String>,
}

impl PageQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            page: first_value(pairs, "page"),
            page_size: first_value(pairs, "page_size"),
        }
    }
}
