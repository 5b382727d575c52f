//! The GIF picker popover, independent of any terminal or toolkit.
//!
//! [`GifButton`] owns the open/closed state and mounts a [`GifPicker`] while
//! open. The picker turns key presses into search text, debounces it into
//! [`SearchRequest`]s for the host to run, and exposes its results as a
//! [`GridSource`] the host draws however it likes.

mod button;
mod grid;
mod hooks;
mod input;
pub mod localize;
mod overlay_layout;
mod picker;
mod search_input;
mod shortcut;

pub use button::GifButton;
pub use grid::{
  COLUMN_COUNT,
  GridCell,
  GridSource,
};
pub use hooks::{
  NoHooks,
  PickerHooks,
};
pub use input::{
  Key,
  KeyEvent,
  KeyOutcome,
  Listener,
  Modifiers,
  PointerButton,
  PointerEvent,
  PointerKind,
};
pub use localize::{
  EnglishLocalizer,
  Localizer,
};
pub use overlay_layout::{
  OverlayRect,
  anchored_panel_rect,
};
pub use picker::{
  GifPicker,
  PanelBody,
  PanelOutcome,
  PickerConfig,
  PickerMode,
  SEARCH_DEBOUNCE,
  SearchRequest,
  SearchResponse,
  is_navigation_key,
};
pub use search_input::SearchInput;
pub use shortcut::{
  Platform,
  Shortcut,
};
