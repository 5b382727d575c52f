//! Client for a GIPHY-compatible animated image search service.
//!
//! The picker only ever talks to a [`SearchProvider`], which cannot fail: any
//! transport or decoding problem is logged and reported as "no results".
//! [`GiphyClient::try_search`] exposes the fallible core for callers that want
//! to tell failures apart.

mod client;
mod error;
mod response;
mod transport;

use async_trait::async_trait;

pub use client::{
  DEFAULT_BASE_URL,
  DEFAULT_QUERY,
  GiphyClient,
  SearchOptions,
  effective_query,
};
pub use error::{
  Result,
  SearchError,
};
pub use response::{
  ResultItem,
  parse_response,
};
pub use transport::{
  HttpResponse,
  ReqwestTransport,
  Transport,
};

/// Something that can turn a query into an ordered list of results.
#[async_trait]
pub trait SearchProvider: Send + Sync {
  /// Results in the order the service returned them. Never fails; an empty
  /// vector stands for both "nothing found" and "something went wrong".
  async fn search(&self, query: &str) -> Vec<ResultItem>;
}
