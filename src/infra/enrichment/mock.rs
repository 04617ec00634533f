use async_trait::async_trait;
use chrono::Local;

use crate::domain::error::SongResult;
use crate::domain::ports::SongEnricher;
use crate::domain::song::NewSong;

pub const MOCK_TEXT: &str = "first verse\n\nsecond verse\n\nthird verse";
pub const MOCK_LINK: &str = "test";

/// Stand-in provider that never leaves the process: today's date, three verses and a
/// placeholder link.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockSongEnricher;

impl MockSongEnricher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SongEnricher for MockSongEnricher {
    async fn enrich(&self, name: &str, group: &str) -> SongResult<NewSong> {
        Ok(NewSong {
            group: group.to_string(),
            song: name.to_string(),
            release_date: Some(Local::now().date_naive()),
            text: MOCK_TEXT.to_string(),
            link: MOCK_LINK.to_string(),
        })
    }
}
