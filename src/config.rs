use clap::{Parser, ValueEnum};
use std::time::Duration;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "user-service")]
#[command(about = "User management service with per-client admission control")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Max requests a client may send per window
    #[arg(long, default_value_t = 5)]
    pub rate_limit: u32,

    // Rate limit window in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub rate_window_ms: u64,

    // Only paths under this prefix are rate limited
    #[arg(long, default_value = "/api")]
    pub rate_limit_prefix: String,

    // Forget clients idle for this long (0 keeps them forever)
    #[arg(long, default_value_t = 60_000)]
    pub client_idle_ms: u64,

    // Seconds between idle-client sweeps
    #[arg(long, default_value_t = 30)]
    pub sweep_interval: u64,

    // Capacity of the notification queue
    #[arg(long, default_value_t = 100)]
    pub notify_queue: usize,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rate limit must allow at least one request per window")]
    ZeroRateLimit,
    #[error("rate window must be longer than 0 ms")]
    ZeroWindow,
    #[error("client idle threshold ({idle_ms} ms) must be 0 or at least the window length ({window_ms} ms)")]
    IdleShorterThanWindow { idle_ms: u64, window_ms: u64 },
    #[error("sweep interval must be longer than 0 s when eviction is enabled")]
    ZeroSweepInterval,
}

/// Settings for the per-client fixed window limiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_ms: u64,
    /// `None` disables eviction of idle clients.
    pub idle_ms: Option<u64>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_ms: 1000,
            idle_ms: None,
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_ms: u64) -> Self {
        Self {
            max_requests,
            window_ms,
            idle_ms: None,
        }
    }

    pub fn with_idle_eviction(mut self, idle_ms: u64) -> Self {
        self.idle_ms = (idle_ms > 0).then_some(idle_ms);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_requests == 0 {
            return Err(ConfigError::ZeroRateLimit);
        }
        if self.window_ms == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        // An evicted client must never lose a window that is still open.
        if let Some(idle_ms) = self.idle_ms {
            if idle_ms < self.window_ms {
                return Err(ConfigError::IdleShorterThanWindow {
                    idle_ms,
                    window_ms: self.window_ms,
                });
            }
        }
        Ok(())
    }
}

impl Args {
    pub fn rate_limit_config(&self) -> Result<RateLimitConfig, ConfigError> {
        let config = RateLimitConfig::new(self.rate_limit, self.rate_window_ms)
            .with_idle_eviction(self.client_idle_ms);
        config.validate()?;
        if config.idle_ms.is_some() && self.sweep_interval == 0 {
            return Err(ConfigError::ZeroSweepInterval);
        }
        Ok(config)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}
