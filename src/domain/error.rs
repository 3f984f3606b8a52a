use thiserror::Error;

/// Errors raised while loading or applying a [`FluidConfig`](super::config::FluidConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed into a config.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A parameter parsed but is outside its accepted range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
