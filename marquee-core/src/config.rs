use std::env;

use chrono::Duration;

/// Core configuration loaded via environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Metadata provider settings
    pub tmdb_api_key: String,
    pub tmdb_language: Option<String>,

    // Playback availability provider settings
    pub availability_api_base: String,
    pub availability_ttl: Duration,

    // Database settings
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let ttl_minutes: i64 = env::var("AVAILABILITY_TTL_MINUTES")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            tmdb_api_key: env::var("TMDB_API_KEY").unwrap_or_default(),
            tmdb_language: env::var("TMDB_LANG").ok(),

            availability_api_base: env::var("AVAILABILITY_API_BASE")
                .unwrap_or_else(|_| "https://vidsrc.xyz".to_string()),
            availability_ttl: Duration::minutes(ttl_minutes.max(1)),

            database_url: env::var("DATABASE_URL").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_environment() {
        let config = Config::from_env().unwrap();
        assert_eq!(config.availability_ttl, Duration::minutes(30));
        assert!(!config.availability_api_base.is_empty());
    }
}
