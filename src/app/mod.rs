pub mod song_service;

pub use song_service::SongService;
