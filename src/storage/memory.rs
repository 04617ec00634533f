//! In-process song repository.
//!
//! Mirrors the Postgres repository's semantics (id ordering, case-insensitive substring
//! filters, partial updates) so the HTTP surface can run and be tested without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::error::{SongError, SongResult};
use crate::domain::ports::SongRepository;
use crate::domain::song::{NewSong, Song, SongFilter, SongPatch};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Song>,
}

#[derive(Default)]
pub struct InMemorySongRepository {
    table: RwLock<Table>,
}

impl InMemorySongRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SongRepository for InMemorySongRepository {
    async fn create_song(&self, song: &NewSong) -> SongResult<i64> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let id = table.next_id;
        table.rows.insert(id, song.clone().into_song(id));
        Ok(id)
    }

    async fn filter_songs(
        &self,
        filter: &SongFilter,
        offset: i64,
        limit: i64,
    ) -> SongResult<Vec<Song>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(0);
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|song| filter.matches(song))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_verse_text(&self, id: i64) -> SongResult<String> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .get(&id)
            .map(|song| song.text.clone())
            .unwrap_or_default())
    }

    async fn delete_song(&self, id: i64) -> SongResult<()> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(SongError::NotFound)
    }

    async fn update_song(&self, id: i64, patch: &SongPatch) -> SongResult<()> {
        let release_date = patch.parsed_release_date()?;
        let mut table = self.table.write().await;
        let song = table.rows.get_mut(&id).ok_or(SongError::NotFound)?;
        patch.apply_to(song, release_date);
        Ok(())
    }

    async fn ping(&self) -> SongResult<()> {
        Ok(())
    }
}
