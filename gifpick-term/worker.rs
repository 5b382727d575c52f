//! Runs committed searches off the UI thread.

use std::sync::Arc;

use gifpick_default::{
  SearchRequest,
  SearchResponse,
};
use gifpick_search::SearchProvider;
use tokio::sync::mpsc::{
  self,
  Receiver,
  Sender,
};

const CHANNEL_CAPACITY: usize = 16;

/// Start the search task. Each request is searched concurrently, so
/// responses may come back in a different order than they were sent; the
/// picker sorts that out by sequence number.
///
/// Must be called from within a tokio runtime.
pub fn spawn<P>(provider: Arc<P>) -> (Sender<SearchRequest>, Receiver<SearchResponse>)
where
  P: SearchProvider + 'static,
{
  let (request_tx, mut request_rx) = mpsc::channel::<SearchRequest>(CHANNEL_CAPACITY);
  let (response_tx, response_rx) = mpsc::channel(CHANNEL_CAPACITY);

  tokio::spawn(async move {
    while let Some(request) = request_rx.recv().await {
      log::debug!("search #{}: {:?}", request.seq, request.query);
      let provider = provider.clone();
      let response_tx = response_tx.clone();
      tokio::spawn(async move {
        let items = provider.search(&request.query).await;
        let response = SearchResponse {
          seq: request.seq,
          items,
        };
        if response_tx.send(response).await.is_err() {
          log::debug!("search #{} finished after the UI went away", request.seq);
        }
      });
    }
  });

  (request_tx, response_rx)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use async_trait::async_trait;
  use gifpick_default::SearchRequest;
  use gifpick_search::{
    ResultItem,
    SearchProvider,
  };

  struct Echo;

  #[async_trait]
  impl SearchProvider for Echo {
    async fn search(&self, query: &str) -> Vec<ResultItem> {
      vec![ResultItem {
        id:          query.to_string(),
        title:       query.to_string(),
        preview_url: format!("https://media/{query}.webp"),
      }]
    }
  }

  #[tokio::test]
  async fn answers_each_request_with_its_sequence_number() {
    let (requests, mut responses) = super::spawn(Arc::new(Echo));
    requests
      .send(SearchRequest {
        seq:   3,
        query: "cat".into(),
      })
      .await
      .unwrap();

    let response = responses.recv().await.unwrap();
    assert_eq!(response.seq, 3);
    assert_eq!(response.items[0].id, "cat");
  }
}
