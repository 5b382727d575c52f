use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{
  Result,
  SearchError,
};

/// Status and body of a finished HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: u16,
  pub body:   Vec<u8>,
}

impl HttpResponse {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

/// The HTTP capability the client needs. Only failures to complete the
/// exchange are errors here; non-2xx statuses come back as responses.
#[async_trait]
pub trait Transport: Send + Sync {
  async fn get(&self, url: &Url) -> Result<HttpResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  client: reqwest::Client,
}

impl ReqwestTransport {
  pub fn new(timeout: Option<Duration>) -> Result<Self> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }
    let client = builder
      .build()
      .map_err(|err| SearchError::Network(err.to_string()))?;
    Ok(Self { client })
  }
}

#[async_trait]
impl Transport for ReqwestTransport {
  async fn get(&self, url: &Url) -> Result<HttpResponse> {
    let response = self
      .client
      .get(url.clone())
      .header(CONTENT_TYPE, "application/json")
      .send()
      .await
      .map_err(|err| SearchError::Network(err.to_string()))?;
    let status = response.status().as_u16();
    let body = response
      .bytes()
      .await
      .map_err(|err| SearchError::Network(err.to_string()))?;
    Ok(HttpResponse {
      status,
      body: body.to_vec(),
    })
  }
}
