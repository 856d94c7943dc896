use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required env var: {0}")]
    Missing(&'static str),
    #[error("Invalid value for env var {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Prefix for the entity routes, e.g. `/sportLink/Cliente/...`
    pub api_prefix: String,
    pub body_limit_mb: usize,
}

impl Default for Config {
    /// In-memory storage with the stock network settings.
    fn default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            database_url: None,
            database_max_connections: 20,
            host: "0.0.0.0".into(),
            port: 8862,
            api_prefix: "/sportLink".into(),
            body_limit_mb: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        let storage = parse_or(&var, "STORAGE", StorageBackend::Postgres)?;
        let database_url = var("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let defaults = Config::default();
        Ok(Self {
            storage,
            database_url,
            database_max_connections: parse_or(
                &var,
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            host: var("HOST").unwrap_or(defaults.host),
            port: parse_or(&var, "PORT", defaults.port)?,
            api_prefix: var("API_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or(defaults.api_prefix),
            body_limit_mb: parse_or(&var, "BODY_LIMIT_MB", defaults.body_limit_mb)?,
        })
    }
}

fn parse_or<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match var(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// `sportLink/` and `/sportLink` both become `/sportLink`; `/` becomes empty.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
