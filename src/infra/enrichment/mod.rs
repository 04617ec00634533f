//! Metadata providers used to enrich new songs.

pub mod http;
pub mod mock;

use std::sync::Arc;

use crate::domain::ports::SongEnricher;
use crate::infra::config::EnrichmentMode;

pub use http::HttpSongEnricher;
pub use mock::MockSongEnricher;

/// Builds the enricher selected by configuration.
pub fn build_enricher(mode: &EnrichmentMode) -> anyhow::Result<Arc<dyn SongEnricher>> {
    match mode {
        EnrichmentMode::Mock => Ok(Arc::new(MockSongEnricher::new())),
        EnrichmentMode::Http { base_url } => Ok(Arc::new(HttpSongEnricher::new(base_url.clone())?)),
    }
}
