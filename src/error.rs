use thiserror::Error;

/// Error type for orientation tracking operations
#[derive(Debug, Error)]
pub enum TrackingError {
    /// The platform has no fused rotation-vector sensor
    #[error("Rotation vector sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// The sensor exists but refused the subscription
    #[error("Failed to subscribe to rotation vector sensor: {0}")]
    SubscriptionFailed(String),

    /// A raw sample could not be converted into an orientation
    #[error("Invalid rotation vector sample: {0}")]
    InvalidSample(String),
}

/// Result type for tracking operations
pub type TrackingResult<T> = Result<T, TrackingError>;

/// Errors raised while loading or validating engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
