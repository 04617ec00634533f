//! Postgres repository test. Needs a reachable database in `DATABASE_URL` (a `.env` file
//! works too); without one the test prints a notice and passes.
//!
//! Each run uses a fresh group name so it can share a database with other data.

use chrono::NaiveDate;
use song_library::infra::config::DatabaseConfig;
use song_library::infra::database;
use song_library::{NewSong, PostgresSongRepository, SongError, SongFilter, SongPatch, SongRepository};

fn new_song(group: &str, song: &str, text: &str) -> NewSong {
    NewSong {
        group: group.to_string(),
        song: song.to_string(),
        release_date: NaiveDate::from_ymd_opt(2006, 7, 16),
        text: text.to_string(),
        link: "https://www.youtube.com/watch?v=Xsp3_a-PMTw".to_string(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_postgres_repository() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres repository test");
        return Ok(());
    };

    let pool = database::connect(&DatabaseConfig {
        url,
        max_connections: 2,
    })
    .await?;
    let repo = PostgresSongRepository::new(pool);
    repo.ping().await?;

    let group = format!("it_group_{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default());
    let first = repo
        .create_song(&new_song(&group, "Supermassive Black Hole", "one\n\ntwo"))
        .await?;
    let second = repo
        .create_song(&new_song(&group, "Knights of 100%_Cydonia", ""))
        .await?;
    assert!(second > first);

    // Case-insensitive substring on group, ordered by id.
    let filter = SongFilter {
        group: group.to_uppercase(),
        ..Default::default()
    };
    let all = repo.filter_songs(&filter, 0, 10).await?;
    assert_eq!(all.iter().map(|s| s.id).collect::<Vec<_>>(), vec![first, second]);
    assert_eq!(repo.filter_songs(&filter, 0, 10).await?, all);
    assert_eq!(repo.filter_songs(&filter, 1, 10).await?.len(), 1);

    // Wildcards in the name are matched literally.
    let literal = SongFilter {
        group: group.clone(),
        name: "100%_c".to_string(),
        id: 0,
    };
    let found = repo.filter_songs(&literal, 0, 10).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, second);
    let wildcard = SongFilter {
        group: group.clone(),
        name: "%".to_string(),
        id: 0,
    };
    assert_eq!(repo.filter_songs(&wildcard, 0, 10).await?.len(), 1);

    assert_eq!(repo.get_verse_text(first).await?, "one\n\ntwo");
    assert_eq!(repo.get_verse_text(-1).await?, "");

    // Partial update.
    let patch = SongPatch {
        text: Some("updated".to_string()),
        ..Default::default()
    };
    repo.update_song(first, &patch).await?;
    let by_id = SongFilter {
        id: first,
        ..Default::default()
    };
    let updated = repo.filter_songs(&by_id, 0, 10).await?;
    assert_eq!(updated[0].text, "updated");
    assert_eq!(updated[0].song, "Supermassive Black Hole");
    assert_eq!(updated[0].release_date, NaiveDate::from_ymd_opt(2006, 7, 16));

    let bad_date = SongPatch {
        release_date: Some("2006-13-01".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        repo.update_song(first, &bad_date).await,
        Err(SongError::InvalidDate(_))
    ));
    assert!(matches!(
        repo.update_song(-1, &patch).await,
        Err(SongError::NotFound)
    ));
    repo.update_song(first, &SongPatch::default()).await?;

    // Delete.
    repo.delete_song(first).await?;
    repo.delete_song(second).await?;
    assert!(repo.filter_songs(&by_id, 0, 10).await?.is_empty());
    assert!(matches!(repo.delete_song(first).await, Err(SongError::NotFound)));

    Ok(())
}
