//! String lookup for user-visible text.
//!
//! The picker only knows message keys. Hosts supply a [`Localizer`]; the
//! built-in [`EnglishLocalizer`] covers the keys used here and echoes anything
//! else back.

use std::borrow::Cow;

pub const EMPTY_RESULTS: &str = "gif_picker.empty";
pub const SEARCH_PLACEHOLDER: &str = "gif_picker.search_placeholder";
pub const BUTTON_LABEL: &str = "gif_button.label";

pub trait Localizer: Send + Sync {
  fn lookup<'a>(&'a self, key: &'a str) -> Cow<'a, str>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
  fn lookup<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
    match key {
      EMPTY_RESULTS => "No GIFs found".into(),
      SEARCH_PLACEHOLDER => "Search GIPHY".into(),
      BUTTON_LABEL => "Open GIF picker".into(),
      other => other.into(),
    }
  }
}
