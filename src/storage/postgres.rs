//! Song repository backed by PostgreSQL.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, warn};

use crate::domain::error::{SongError, SongResult};
use crate::domain::ports::SongRepository;
use crate::domain::song::{NewSong, Song, SongFilter, SongPatch};

/// `"group"` is a reserved word, so it is always quoted.
pub const CREATE_SONGS_TABLE_SQL: &str = r#"CREATE TABLE IF NOT EXISTS songs (
    id BIGSERIAL PRIMARY KEY,
    "group" TEXT NOT NULL,
    song TEXT NOT NULL,
    release_date DATE,
    text TEXT NOT NULL DEFAULT '',
    link TEXT NOT NULL DEFAULT ''
)"#;

const SELECT_SONG_COLUMNS: &str = r#"SELECT id, "group", song, release_date, text, link FROM songs"#;

/// Creates the `songs` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> SongResult<()> {
    sqlx::query(CREATE_SONGS_TABLE_SQL).execute(pool).await?;
    Ok(())
}

#[derive(Clone)]
pub struct PostgresSongRepository {
    pool: PgPool,
}

impl PostgresSongRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn song_exists(&self, id: i64) -> SongResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM songs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

/// Escapes LIKE wildcards so user input is matched literally.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl SongRepository for PostgresSongRepository {
    async fn create_song(&self, song: &NewSong) -> SongResult<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"INSERT INTO songs ("group", song, release_date, text, link)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id"#,
        )
        .bind(&song.group)
        .bind(&song.song)
        .bind(song.release_date)
        .bind(&song.text)
        .bind(&song.link)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(op = "songs.create", error = %e, "failed to create song");
            SongError::from(e)
        })?;

        info!(op = "songs.create", song_id = id, "song created");
        Ok(id)
    }

    async fn filter_songs(
        &self,
        filter: &SongFilter,
        offset: i64,
        limit: i64,
    ) -> SongResult<Vec<Song>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_SONG_COLUMNS);
        qb.push(" WHERE TRUE");
        if !filter.group.is_empty() {
            qb.push(r#" AND "group" ILIKE "#)
                .push_bind(like_pattern(&filter.group));
        }
        if !filter.name.is_empty() {
            qb.push(" AND song ILIKE ").push_bind(like_pattern(&filter.name));
        }
        if filter.id > 0 {
            qb.push(" AND id = ").push_bind(filter.id);
        }
        qb.push(" ORDER BY id ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let songs = qb
            .build_query_as::<Song>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(op = "songs.filter", error = %e, "failed to list songs");
                SongError::from(e)
            })?;

        debug!(op = "songs.filter", count = songs.len(), "songs listed");
        Ok(songs)
    }

    async fn get_verse_text(&self, id: i64) -> SongResult<String> {
        let text: Option<String> = sqlx::query_scalar("SELECT text FROM songs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if text.is_none() {
            warn!(op = "songs.verses", song_id = id, "song has no stored text");
        }
        Ok(text.unwrap_or_default())
    }

    async fn delete_song(&self, id: i64) -> SongResult<()> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(op = "songs.delete", song_id = id, error = %e, "failed to delete song");
                SongError::from(e)
            })?;

        if result.rows_affected() == 0 {
            debug!(op = "songs.delete", song_id = id, "song not found");
            return Err(SongError::NotFound);
        }
        info!(op = "songs.delete", song_id = id, "song deleted");
        Ok(())
    }

    async fn update_song(&self, id: i64, patch: &SongPatch) -> SongResult<()> {
        let release_date = patch.parsed_release_date().map_err(|e| {
            debug!(op = "songs.update", song_id = id, error = %e, "rejected release date");
            e
        })?;

        if patch.is_empty() {
            return if self.song_exists(id).await? {
                Ok(())
            } else {
                Err(SongError::NotFound)
            };
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE songs SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(group) = patch.group() {
                set.push(r#""group" = "#).push_bind_unseparated(group.to_string());
            }
            if let Some(song) = patch.song() {
                set.push("song = ").push_bind_unseparated(song.to_string());
            }
            if let Some(date) = release_date {
                set.push("release_date = ").push_bind_unseparated(date);
            }
            if let Some(text) = patch.text() {
                set.push("text = ").push_bind_unseparated(text.to_string());
            }
            if let Some(link) = patch.link() {
                set.push("link = ").push_bind_unseparated(link.to_string());
            }
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await.map_err(|e| {
            warn!(op = "songs.update", song_id = id, error = %e, "failed to update song");
            SongError::from(e)
        })?;

        if result.rows_affected() == 0 {
            debug!(op = "songs.update", song_id = id, "song not found");
            return Err(SongError::NotFound);
        }
        info!(op = "songs.update", song_id = id, "song updated");
        Ok(())
    }

    async fn ping(&self) -> SongResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
