use tracing_subscriber::EnvFilter;

/// Builds the filter directive for a configured `LOG_LEVEL`. `prod` means info level.
pub fn filter_directive(level: &str) -> String {
    let level = match level.trim().to_lowercase().as_str() {
        "prod" | "" => "info".to_string(),
        other => other.to_string(),
    };
    format!("{level},song_library={level},sqlx=warn,reqwest=warn")
}

/// Installs the global subscriber. `RUST_LOG` still overrides the configured level;
/// `prod` switches to JSON lines.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directive(level))
            .map_err(|e| anyhow::anyhow!("invalid LOG_LEVEL '{}': {}", level, e))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    let installed = if level.trim().eq_ignore_ascii_case("prod") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prod_maps_to_info() {
        assert!(filter_directive("prod").starts_with("info,song_library=info"));
        assert!(filter_directive("DEBUG").starts_with("debug,"));
        assert!(EnvFilter::try_new(filter_directive("warn")).is_ok());
    }
}
