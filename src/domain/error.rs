/// Errors produced by the song catalog.
///
/// Lower layers return these variants unformatted; only the HTTP layer decides which
/// status code and message a caller sees.
#[derive(Debug, thiserror::Error)]
pub enum SongError {
    /// Request input failed validation before reaching the service.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Update/delete target does not exist.
    #[error("song not found")]
    NotFound,

    /// Verse page starts past the last verse.
    #[error("no more verses available")]
    NoMoreVerses,

    /// Release date is not `YYYY-MM-DD`.
    #[error("invalid release date: {0}")]
    InvalidDate(String),

    /// Metadata provider unreachable or answered with a non-2xx status.
    #[error("metadata provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Metadata provider answered with a body we could not decode.
    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl SongError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// True for errors caused by the caller's input rather than by a dependency.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound | Self::NoMoreVerses | Self::InvalidDate(_)
        )
    }
}

pub type SongResult<T> = std::result::Result<T, SongError>;
