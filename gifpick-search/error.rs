use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
  #[error("request failed: {0}")]
  Network(String),
  #[error("service responded with status {0}")]
  Status(u16),
  #[error("could not decode response: {0}")]
  Parse(#[from] serde_json::Error),
  #[error("invalid service url: {0}")]
  InvalidUrl(#[from] url::ParseError),
  #[error("service url {0} cannot have a path")]
  CannotBeABase(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
