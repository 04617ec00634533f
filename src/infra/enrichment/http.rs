// Responsible for all communication with the song metadata provider.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::error::{SongError, SongResult};
use crate::domain::ports::SongEnricher;
use crate::domain::song::{NewSong, RELEASE_DATE_FORMAT};

/// Fixed client timeout for provider calls.
pub const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of `GET {base}/info`. Name and group are not part of it; the caller's values win.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SongDetail {
    #[serde(default)]
    release_date: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    link: String,
}

/// Providers disagree on the date format; accept ISO dates, `DD.MM.YYYY` and RFC 3339.
fn parse_provider_date(raw: &str) -> SongResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT) {
        return Ok(Some(date));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d.%m.%Y") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| Some(ts.date_naive()))
        .map_err(|_| SongError::Decode(format!("unrecognised releaseDate '{}'", raw)))
}

pub struct HttpSongEnricher {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpSongEnricher {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SongEnricher for HttpSongEnricher {
    async fn enrich(&self, name: &str, group: &str) -> SongResult<NewSong> {
        let url = format!("{}/info", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("group", group), ("song", name)])
            .send()
            .await
            .map_err(|e| {
                warn!(op = "provider.enrich", error = %e, "can't connect to metadata provider");
                SongError::ProviderUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(op = "provider.enrich", status = %status, "failed to get song info");
            return Err(SongError::ProviderUnavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let detail = response.json::<SongDetail>().await.map_err(|e| {
            warn!(op = "provider.enrich", error = %e, "failed to decode song info");
            SongError::Decode(e.to_string())
        })?;

        let release_date = parse_provider_date(&detail.release_date)?;
        debug!(op = "provider.enrich", group, song = name, "song enriched");

        Ok(NewSong {
            group: group.to_string(),
            song: name.to_string(),
            release_date,
            text: detail.text,
            link: detail.link,
        })
    }
}
