use std::time::Duration;

/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden through environment variables:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | LOG_LEVEL | info | tracing level filter |
/// | LOG_DIR | (unset) | daily-rolling log file directory |
/// | LOCK_WAIT_MS | 3000 | bounded wait for the table closing lock |
/// | NOTIFY_QUEUE_CAPACITY | 1024 | notification channel capacity |
/// | ENVIRONMENT | development | development \| staging \| production |
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 LOCK_WAIT_MS=1000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// tracing level filter
    pub log_level: String,
    /// Optional log file directory
    pub log_dir: Option<String>,
    /// Bounded wait for the per-table closing lock (milliseconds); expiry
    /// surfaces TableLockBusy instead of hanging a staff request
    pub lock_wait_ms: u64,
    /// Notification channel capacity; overflow drops messages with a warning
    pub notify_queue_capacity: usize,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            lock_wait_ms: std::env::var("LOCK_WAIT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            notify_queue_capacity: std::env::var("NOTIFY_QUEUE_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1024),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    pub fn lock_wait(&self) -> Duration {
        Duration::from_millis(self.lock_wait_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            log_level: "info".into(),
            log_dir: None,
            lock_wait_ms: 3000,
            notify_queue_capacity: 1024,
            environment: "development".into(),
        }
    }
}
