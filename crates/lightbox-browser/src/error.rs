use thiserror::Error;

/// A [`BrowserConfig`](crate::BrowserConfig) value that cannot drive the engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("gap must be finite and non-negative (got {0})")]
    InvalidGap(f32),
    #[error("{name} must be finite and positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must be finite and non-negative (got {value})")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} must lie in (0, 1] (got {value})")]
    FactorOutOfRange { name: &'static str, value: f32 },
}

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("invalid browser configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("viewport {width}x{height} has no area")]
    EmptyViewport { width: f32, height: f32 },
}

/// Failure reported by a [`MediaSource`](crate::MediaSource) for one request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no media at index {0}")]
    NotFound(usize),
    #[error("media could not be loaded: {0}")]
    Load(String),
}
