pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::SongService;
pub use domain::{NewSong, Page, Song, SongEnricher, SongError, SongFilter, SongPatch, SongRepository};
pub use infra::config::{AppConfig, EnrichmentMode};
pub use infra::enrichment::{HttpSongEnricher, MockSongEnricher};
pub use storage::{InMemorySongRepository, PostgresSongRepository};
