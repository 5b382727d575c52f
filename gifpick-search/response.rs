use serde::Deserialize;

use crate::Result;

/// One search hit. Immutable once decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultItem {
  pub id:          String,
  pub title:       String,
  pub preview_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
  data: Vec<RawGif>,
}

#[derive(Debug, Deserialize)]
struct RawGif {
  #[serde(default)]
  id:     String,
  #[serde(default)]
  title:  String,
  #[serde(default)]
  images: RawImages,
}

#[derive(Debug, Default, Deserialize)]
struct RawImages {
  original:    Option<RawRendition>,
  fixed_width: Option<RawRendition>,
}

#[derive(Debug, Deserialize)]
struct RawRendition {
  webp: Option<String>,
  url:  Option<String>,
}

impl RawImages {
  /// First usable preview, animated webp preferred, full size preferred.
  fn preview_url(self) -> Option<String> {
    [self.original, self.fixed_width]
      .into_iter()
      .flatten()
      .flat_map(|rendition| [rendition.webp, rendition.url])
      .flatten()
      .find(|url| !url.is_empty())
  }
}

/// Decode a search response body, keeping the service's order.
///
/// Entries without any preview URL cannot be shown and are skipped.
pub fn parse_response(body: &[u8]) -> Result<Vec<ResultItem>> {
  let response: SearchResponse = serde_json::from_slice(body)?;
  let items = response
    .data
    .into_iter()
    .filter_map(|gif| {
      let RawGif { id, title, images } = gif;
      match images.preview_url() {
        Some(preview_url) => {
          Some(ResultItem {
            id,
            title,
            preview_url,
          })
        },
        None => {
          log::debug!("skipping search result {id:?} without a preview url");
          None
        },
      }
    })
    .collect();
  Ok(items)
}
