//! Contracts the song service depends on.
//!
//! The service only sees these traits, so storage and the metadata provider can be
//! swapped (Postgres vs in-memory, HTTP provider vs canned mock) without touching it.

use async_trait::async_trait;

use crate::domain::error::SongResult;
use crate::domain::song::{NewSong, Song, SongFilter, SongPatch};

/// Persistence gateway for the `songs` table.
#[async_trait]
pub trait SongRepository: Send + Sync {
    /// Inserts a song and returns the id assigned by storage.
    async fn create_song(&self, song: &NewSong) -> SongResult<i64>;

    /// Lists songs matching `filter`, ordered by id, skipping `offset` rows and returning
    /// at most `limit`.
    async fn filter_songs(&self, filter: &SongFilter, offset: i64, limit: i64)
        -> SongResult<Vec<Song>>;

    /// Returns the stored text of a song, or an empty string if the song does not exist.
    async fn get_verse_text(&self, id: i64) -> SongResult<String>;

    /// Deletes a song. `NotFound` if nothing was deleted.
    async fn delete_song(&self, id: i64) -> SongResult<()>;

    /// Applies a partial update. `InvalidDate` before touching storage if the release
    /// date does not parse, `NotFound` if the row does not exist.
    async fn update_song(&self, id: i64, patch: &SongPatch) -> SongResult<()>;

    /// Cheap liveness probe.
    async fn ping(&self) -> SongResult<()>;
}

/// Source of song metadata (release date, text, link).
#[async_trait]
pub trait SongEnricher: Send + Sync {
    /// Looks up `name` by `group`. The returned song always carries the given name and
    /// group, whatever the provider answered.
    async fn enrich(&self, name: &str, group: &str) -> SongResult<NewSong>;
}
