use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::{
  Result,
  ResultItem,
  SearchError,
  SearchProvider,
  parse_response,
  transport::{
    ReqwestTransport,
    Transport,
  },
};

pub const DEFAULT_BASE_URL: &str = "https://api.giphy.com";

/// Query sent when the user has not typed anything, so the picker always has
/// something to show.
pub const DEFAULT_QUERY: &str = "a";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
  pub base_url:      String,
  pub api_key:       String,
  pub default_query: String,
  pub timeout:       Option<Duration>,
}

impl Default for SearchOptions {
  fn default() -> Self {
    Self {
      base_url:      DEFAULT_BASE_URL.to_string(),
      api_key:       String::new(),
      default_query: DEFAULT_QUERY.to_string(),
      timeout:       None,
    }
  }
}

/// The query actually sent for `query`: empty input becomes `default_query`.
/// Whitespace is sent as typed.
pub fn effective_query<'a>(query: &'a str, default_query: &'a str) -> &'a str {
  if query.is_empty() {
    default_query
  } else {
    query
  }
}

pub struct GiphyClient<T = ReqwestTransport> {
  transport:     T,
  base_url:      Url,
  api_key:       String,
  default_query: String,
}

impl GiphyClient<ReqwestTransport> {
  pub fn new(options: SearchOptions) -> Result<Self> {
    let transport = ReqwestTransport::new(options.timeout)?;
    Self::with_transport(options, transport)
  }
}

impl<T: Transport> GiphyClient<T> {
  pub fn with_transport(options: SearchOptions, transport: T) -> Result<Self> {
    let base_url = Url::parse(&options.base_url)?;
    if base_url.cannot_be_a_base() {
      return Err(SearchError::CannotBeABase(options.base_url));
    }
    let default_query = if options.default_query.trim().is_empty() {
      DEFAULT_QUERY.to_string()
    } else {
      options.default_query
    };
    Ok(Self {
      transport,
      base_url,
      api_key: options.api_key,
      default_query,
    })
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  pub fn default_query(&self) -> &str {
    &self.default_query
  }

  /// `{base}/v1/gifs/search?api_key=..&q=..` for the effective query.
  pub fn search_url(&self, query: &str) -> Url {
    let query = effective_query(query, &self.default_query);
    let mut url = self.base_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.pop_if_empty().extend(["v1", "gifs", "search"]);
    }
    url
      .query_pairs_mut()
      .clear()
      .append_pair("api_key", &self.api_key)
      .append_pair("q", query);
    url
  }

  pub async fn try_search(&self, query: &str) -> Result<Vec<ResultItem>> {
    let url = self.search_url(query);
    let response = self.transport.get(&url).await?;
    if !response.is_success() {
      return Err(SearchError::Status(response.status));
    }
    parse_response(&response.body)
  }
}

#[async_trait]
impl<T: Transport> SearchProvider for GiphyClient<T> {
  async fn search(&self, query: &str) -> Vec<ResultItem> {
    match self.try_search(query).await {
      Ok(items) => {
        log::debug!("gif search {query:?} returned {} results", items.len());
        items
      },
      Err(err) => {
        log::error!("Error fetching gifs for {query:?}: {err}");
        Vec::new()
      },
    }
  }
}
