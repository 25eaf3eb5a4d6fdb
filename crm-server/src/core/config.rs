use crate::query::PageLimits;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (`.env` is loaded first):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:crm.db | SQLite database URL |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DB_MAX_CONNECTIONS | 5 | pool size |
/// | DEFAULT_PAGE_SIZE | 20 | page size when `first` is absent |
/// | MAX_PAGE_SIZE | 100 | upper bound for `first` |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (unset) | rolling log directory |
/// | ENVIRONMENT | development | development / production |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/crm.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL
    pub database_url: String,
    /// HTTP API port
    pub http_port: u16,
    /// Connection pool size (in-memory databases always use one)
    pub db_max_connections: u32,
    pub default_page_size: i64,
    pub max_page_size: i64,
    /// Tracing level, overridden by `RUST_LOG`
    pub log_level: String,
    /// Daily rolling log files go here when set
    pub log_dir: Option<String>,
    /// development | production
    pub environment: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:crm.db".into()),
            http_port: env_or("HTTP_PORT", 3000),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 5),
            default_page_size: env_or("DEFAULT_PAGE_SIZE", 20),
            max_page_size: env_or("MAX_PAGE_SIZE", 100),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// In-memory database and default limits, independent of the environment
    pub fn for_test() -> Self {
        Self {
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            db_max_connections: 1,
            default_page_size: 20,
            max_page_size: 100,
            log_level: "debug".into(),
            log_dir: None,
            environment: "test".into(),
        }
    }

    pub fn page_limits(&self) -> PageLimits {
        let max_size = self.max_page_size.max(1);
        PageLimits {
            default_size: self.default_page_size.clamp(1, max_size),
            max_size,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_limits_are_sane() {
        let mut config = Config::for_test();
        config.default_page_size = 500;
        config.max_page_size = 50;
        assert_eq!(
            config.page_limits(),
            PageLimits {
                default_size: 50,
                max_size: 50
            }
        );

        config.max_page_size = 0;
        assert_eq!(config.page_limits().max_size, 1);
    }

    #[test]
    fn test_for_test_is_in_memory() {
        let config = Config::for_test();
        assert!(config.database_url.contains(":memory:"));
        assert!(!config.is_production());
    }
}
