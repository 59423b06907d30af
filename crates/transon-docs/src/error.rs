use thiserror::Error;

/// Errors raised while loading the documentation payload or the viewer config.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid documentation payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("invalid viewer config: {0}")]
    Config(#[from] toml::de::Error),
}
