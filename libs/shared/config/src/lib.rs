use std::env;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub database_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!("PORT value {:?} is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let config = Self {
            port,
            database_url: env::var("DATABASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("DATABASE_URL not set, using empty value");
                    String::new()
                }),
            database_api_key: env::var("DATABASE_API_KEY")
                .unwrap_or_default(),
        };

        if !config.is_configured() {
            warn!("Document store not configured - records will only live in memory");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.database_url.is_empty()
    }

    /// Configuration with no external store, used by tests and local runs.
    pub fn in_memory() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: String::new(),
            database_api_key: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_config_is_not_configured() {
        let config = AppConfig::in_memory();
        assert!(!config.is_configured());
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn database_url_marks_config_as_configured() {
        let config = AppConfig {
            database_url: "http://localhost:54321".to_string(),
            ..AppConfig::in_memory()
        };
        assert!(config.is_configured());
    }
}
