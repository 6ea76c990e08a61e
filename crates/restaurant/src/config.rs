use std::str::FromStr;
use std::time::Duration;

/// Kitchen configuration.
///
/// # Environment Variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | KITCHEN_WORKERS | 2 | Orders prepared at the same time (at least 1) |
/// | KITCHEN_MINUTE_MS | 1000 | Real milliseconds per cooking minute |
/// | STORE_BUFFER_SIZE | 32 | Request channel capacity of each store actor |
///
/// # Example
///
/// ```ignore
/// KITCHEN_WORKERS=4 KITCHEN_MINUTE_MS=60000 cargo run
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KitchenConfig {
    pub workers: usize,
    /// How long one cooking minute lasts.
    pub minute: Duration,
    pub store_buffer_size: usize,
}

impl KitchenConfig {
    /// Loads the configuration from the environment.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            workers: env_or("KITCHEN_WORKERS", 2usize).max(1),
            minute: Duration::from_millis(env_or("KITCHEN_MINUTE_MS", 1000u64)),
            store_buffer_size: env_or("STORE_BUFFER_SIZE", 32usize).max(1),
        }
    }

    /// Defaults with an explicit worker count. Used by tests and embedders.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            minute: Duration::from_secs(1),
            store_buffer_size: 32,
        }
    }

    pub fn with_minute(mut self, minute: Duration) -> Self {
        self.minute = minute;
        self
    }
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok().as_deref(), default)
}

fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
