use thiserror::Error;

/// The main error type for tl-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Serialization/Deserialization error
  #[error("Serialization error")]
  Serde(#[from] serde_json::Error),

  /// Invalid response from an upstream API
  #[error("Invalid API response: {0}")]
  InvalidResponse(String),
}

/// Result type alias for tl-* crates
pub type Result<T> = std::result::Result<T, Error>;
