//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where song metadata comes from on create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentMode {
    /// Canned data, no network.
    Mock,
    /// `GET {base_url}/info`.
    Http { base_url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub log_level: String,
    pub port: u16,
    pub enrichment: EnrichmentMode,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let host = get("DB_HOST").context("DB_HOST or DATABASE_URL must be set")?;
                let port = match get("DB_PORT") {
                    Some(p) => p.parse::<u16>().context("DB_PORT must be a valid port")?,
                    None => DEFAULT_DB_PORT,
                };
                let user = get("DB_USER").context("DB_USER must be set")?;
                let password = get("DB_PASSWORD").unwrap_or_default();
                let name = get("DB_NAME").context("DB_NAME must be set")?;
                format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, name)
            }
        };
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a valid u32")?
                .max(1),
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let port = match get("PORT") {
            Some(p) => p.parse::<u16>().context("PORT must be a valid port")?,
            None => DEFAULT_PORT,
        };

        let base_url = get("ENRICHMENT_API_URL");
        let enrichment = match get("ENRICHMENT_MODE").map(|m| m.to_lowercase()).as_deref() {
            Some("mock") => EnrichmentMode::Mock,
            Some("http") => EnrichmentMode::Http {
                base_url: base_url
                    .ok_or_else(|| anyhow!("ENRICHMENT_MODE=http requires ENRICHMENT_API_URL"))?,
            },
            Some(other) => {
                return Err(anyhow!(
                    "ENRICHMENT_MODE must be 'mock' or 'http' (got '{}')",
                    other
                ))
            }
            None => match base_url {
                Some(base_url) => EnrichmentMode::Http { base_url },
                None => EnrichmentMode::Mock,
            },
        };

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
            },
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            port,
            enrichment,
        })
    }
}
