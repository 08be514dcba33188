// File: crates/chart-core/src/error.rs
// Summary: Error type for fallible core operations (viewport validation, config, IO).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport {width}x{height}: dimensions must be finite and positive")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid color literal '{0}'")]
    InvalidColor(String),

    #[error("failed to parse chart config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
