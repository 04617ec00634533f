//! The song use-case service.
//!
//! Sits between the HTTP layer and the two ports:
//! 1.  Creating a song asks the enricher for metadata, then persists the result.
//! 2.  Listing turns a 1-indexed page into an offset/limit for the repository.
//! 3.  Verse paging splits the stored text on blank lines and slices out one page.
//! 4.  Update and delete go straight to the repository.

use std::sync::Arc;

use tracing::debug;

use crate::domain::error::{SongError, SongResult};
use crate::domain::pagination::{paginate_verses, Page};
use crate::domain::ports::{SongEnricher, SongRepository};
use crate::domain::song::{Song, SongFilter, SongPatch};

pub struct SongService {
    repository: Arc<dyn SongRepository>,
    enricher: Arc<dyn SongEnricher>,
}

impl SongService {
    pub fn new(repository: Arc<dyn SongRepository>, enricher: Arc<dyn SongEnricher>) -> Self {
        Self {
            repository,
            enricher,
        }
    }

    pub fn repository(&self) -> &Arc<dyn SongRepository> {
        &self.repository
    }

    pub async fn filter_songs(&self, filter: &SongFilter, page: Page) -> SongResult<Vec<Song>> {
        self.repository
            .filter_songs(filter, page.offset(), page.limit())
            .await
    }

    /// Enriches and stores a new song, returning its id.
    pub async fn create_song(&self, group: &str, name: &str) -> SongResult<i64> {
        let song = self.enricher.enrich(name, group).await?;
        self.repository.create_song(&song).await
    }

    pub async fn get_verses_with_pagination(&self, id: i64, page: Page) -> SongResult<Vec<String>> {
        let text = self.repository.get_verse_text(id).await?;
        paginate_verses(&text, page).map_err(|e| {
            if matches!(e, SongError::NoMoreVerses) {
                debug!(
                    op = "service.verses",
                    song_id = id,
                    page = page.page,
                    page_size = page.page_size,
                    "no more verses available"
                );
            }
            e
        })
    }

    pub async fn update_song(&self, id: i64, patch: &SongPatch) -> SongResult<()> {
        self.repository.update_song(id, patch).await
    }

    pub async fn delete_song(&self, id: i64) -> SongResult<()> {
        self.repository.delete_song(id).await
    }
}
