//! The song entity and the shapes it takes on its way in and out of storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::error::SongError;

/// Separator between verses inside `Song::text`.
pub const VERSE_DELIMITER: &str = "\n\n";

/// Wire/storage format of `releaseDate`.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A stored song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Song {
    pub id: i64,
    pub group: String,
    pub song: String,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<NaiveDate>,
    pub text: String,
    pub link: String,
}

/// A song that has been enriched but not persisted yet (no id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSong {
    pub group: String,
    pub song: String,
    pub release_date: Option<NaiveDate>,
    pub text: String,
    pub link: String,
}

impl NewSong {
    pub fn into_song(self, id: i64) -> Song {
        Song {
            id,
            group: self.group,
            song: self.song,
            release_date: self.release_date,
            text: self.text,
            link: self.link,
        }
    }
}

/// Partial update of a song.
///
/// `None` and empty strings both mean "leave the column alone". The release date is kept
/// as the raw string the caller sent; it is parsed by [`SongPatch::parsed_release_date`]
/// before anything touches storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct SongPatch {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default, rename = "releaseDate")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl SongPatch {
    pub fn group(&self) -> Option<&str> {
        non_empty(&self.group)
    }

    pub fn song(&self) -> Option<&str> {
        non_empty(&self.song)
    }

    pub fn text(&self) -> Option<&str> {
        non_empty(&self.text)
    }

    pub fn link(&self) -> Option<&str> {
        non_empty(&self.link)
    }

    /// Parses the supplied release date, if any.
    pub fn parsed_release_date(&self) -> Result<Option<NaiveDate>, SongError> {
        match non_empty(&self.release_date) {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT)
                .map(Some)
                .map_err(|_| SongError::InvalidDate(raw.to_string())),
        }
    }

    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.group().is_none()
            && self.song().is_none()
            && non_empty(&self.release_date).is_none()
            && self.text().is_none()
            && self.link().is_none()
    }

    /// Applies the supplied fields to `target`. The release date must already be parsed.
    pub fn apply_to(&self, target: &mut Song, release_date: Option<NaiveDate>) {
        if let Some(group) = self.group() {
            target.group = group.to_string();
        }
        if let Some(song) = self.song() {
            target.song = song.to_string();
        }
        if let Some(date) = release_date {
            target.release_date = Some(date);
        }
        if let Some(text) = self.text() {
            target.text = text.to_string();
        }
        if let Some(link) = self.link() {
            target.link = link.to_string();
        }
    }
}

/// Criteria for listing songs. Empty strings and a non-positive id mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: String,
    pub name: String,
    pub id: i64,
}

impl SongFilter {
    /// In-memory equivalent of the SQL filter: case-insensitive substring on group/song,
    /// exact match on id.
    pub fn matches(&self, song: &Song) -> bool {
        if !self.group.is_empty() && !contains_ignore_case(&song.group, &self.group) {
            return false;
        }
        if !self.name.is_empty() && !contains_ignore_case(&song.song, &self.name) {
            return false;
        }
        if self.id > 0 && song.id != self.id {
            return false;
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
