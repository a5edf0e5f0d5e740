use std::time::Duration;

use anyhow::{Context, Result};

use crate::candidates::strength::DEFAULT_MAX_STRENGTH;

/// Storage path value that selects the in-memory repository.
pub const IN_MEMORY_STORAGE: &str = ":memory:";

/// Application configuration loaded from environment variables.
/// Every field has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_path: String,
    /// Artificial delay applied to every store call, mimicking network latency.
    pub simulated_latency: Duration,
    /// How long a simulated contact message takes to "send".
    pub contact_delay: Duration,
    pub max_profile_strength: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            storage_path: "data/candidates.json".to_string(),
            simulated_latency: Duration::from_millis(300),
            contact_delay: Duration::from_millis(1000),
            max_profile_strength: DEFAULT_MAX_STRENGTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            storage_path: std::env::var("STORAGE_PATH").unwrap_or(defaults.storage_path),
            simulated_latency: parse_millis("SIMULATED_LATENCY_MS", defaults.simulated_latency)?,
            contact_delay: parse_millis("CONTACT_DELAY_MS", defaults.contact_delay)?,
            max_profile_strength: parse_env("MAX_PROFILE_STRENGTH", defaults.max_profile_strength)?,
        })
    }

    pub fn uses_in_memory_storage(&self) -> bool {
        self.storage_path == IN_MEMORY_STORAGE
    }
}

fn parse_millis(key: &str, default: Duration) -> Result<Duration> {
    let millis = parse_env(key, default.as_millis() as u64)?;
    Ok(Duration::from_millis(millis))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
