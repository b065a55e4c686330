//! Host configuration parsed from environment variables.

use std::str::FromStr;

use canvas::error::ErrorCode;
use canvas::lattice::LatticeConfig;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_GRID_COLS: u32 = 21;
pub const DEFAULT_GRID_ROWS: u32 = 21;
pub const DEFAULT_GRID_SPACING: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: '{value}' ({reason})")]
    Parse { key: &'static str, value: String, reason: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "E_CONFIG_PARSE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for BackendTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    /// Circuit backend base URL, without a trailing slash.
    pub backend_url: String,
    pub timeouts: BackendTimeouts,
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub grid_spacing: f64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            timeouts: BackendTimeouts::default(),
            grid_cols: DEFAULT_GRID_COLS,
            grid_rows: DEFAULT_GRID_ROWS,
            grid_spacing: DEFAULT_GRID_SPACING,
        }
    }
}

impl StudioConfig {
    /// Build typed config from environment variables. Every variable is optional.
    ///
    /// - `STUDIO_BACKEND_URL`: default `http://127.0.0.1:5000`
    /// - `STUDIO_REQUEST_TIMEOUT_SECS`: default 30
    /// - `STUDIO_CONNECT_TIMEOUT_SECS`: default 10
    /// - `STUDIO_GRID_COLS` / `STUDIO_GRID_ROWS`: default 21
    /// - `STUDIO_GRID_SPACING`: default 50.0
    ///
    /// # Errors
    ///
    /// `ConfigError::Parse` when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = std::env::var("STUDIO_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = BackendTimeouts {
            request_secs: env_parse("STUDIO_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse("STUDIO_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let grid_cols = env_parse("STUDIO_GRID_COLS", DEFAULT_GRID_COLS)?;
        let grid_rows = env_parse("STUDIO_GRID_ROWS", DEFAULT_GRID_ROWS)?;
        let grid_spacing = env_parse("STUDIO_GRID_SPACING", DEFAULT_GRID_SPACING)?;
        if !grid_spacing.is_finite() || grid_spacing <= 0.0 {
            return Err(ConfigError::Parse {
                key: "STUDIO_GRID_SPACING",
                value: grid_spacing.to_string(),
                reason: "must be positive".into(),
            });
        }

        Ok(Self { backend_url, timeouts, grid_cols, grid_rows, grid_spacing })
    }

    /// Lattice dimensions for a fresh editor, anchored at the world origin. The CLI
    /// checks exported payloads against it.
    #[must_use]
    pub fn lattice_config(&self) -> LatticeConfig {
        LatticeConfig {
            cols: self.grid_cols,
            rows: self.grid_rows,
            spacing: self.grid_spacing,
            origin_x: 0.0,
            origin_y: 0.0,
        }
    }
}

fn env_parse<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::Parse { key, value: raw.clone(), reason: e.to_string() }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
