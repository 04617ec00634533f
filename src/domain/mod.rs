//! Song catalog domain: the entity, its errors, page arithmetic and the ports the
//! service talks to.

pub mod error;
pub mod pagination;
pub mod ports;
pub mod song;

pub use error::{SongError, SongResult};
pub use pagination::{paginate_verses, Page};
pub use ports::{SongEnricher, SongRepository};
pub use song::{NewSong, Song, SongFilter, SongPatch};
