//! The picker panel: search text, debounced querying, and the result grid.
//!
//! The panel starts in navigation mode, where arrows move around the grid and
//! typing a character switches to search mode. Down or Tab in search mode
//! hands focus back to the grid and keeps the query. It never closes itself;
//! [`PanelOutcome::CloseRequested`] asks its owner to do that.

use std::{
  borrow::Cow,
  time::{
    Duration,
    Instant,
  },
};

use gifpick_event::{
  Debouncer,
  RequestSequence,
  Subscription,
  Subscriptions,
};
use gifpick_search::ResultItem;

use crate::{
  Key,
  KeyEvent,
  Listener,
  Localizer,
  grid::{
    COLUMN_COUNT,
    GridCell,
    GridSource,
    clamp_row,
    row_count,
  },
  localize,
  search_input::{
    SearchInput,
    is_text_char,
  },
};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
  pub debounce:      Duration,
  pub columns:       usize,
  pub close_on_pick: bool,
  /// Drop search responses that belong to a superseded query.
  pub discard_stale: bool,
  /// Letter of the global open/close chord.
  pub shortcut_key:  char,
}

impl Default for PickerConfig {
  fn default() -> Self {
    Self {
      debounce:      SEARCH_DEBOUNCE,
      columns:       COLUMN_COUNT,
      close_on_pick: true,
      discard_stale: true,
      shortcut_key:  'i',
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerMode {
  #[default]
  Navigation,
  Search,
}

/// A search the host should run. `query` is the committed text as typed;
/// blank text is turned into the default query by the search client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
  pub seq:   u64,
  pub query: String,
}

/// A finished search, handed back through [`GifPicker::apply_results`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
  pub seq:   u64,
  pub items: Vec<ResultItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
  /// Not consumed; keep propagating.
  Continue,
  /// Consumed.
  Handled,
  /// The panel wants its owner to close it.
  CloseRequested,
  /// The user picked this item.
  Picked(ResultItem),
}

pub enum PanelBody<'a> {
  Grid(GridSource<'a>),
  Empty(Cow<'a, str>),
}

/// Keys that never switch navigation mode into search mode.
pub fn is_navigation_key(key: Key) -> bool {
  matches!(
    key,
    Key::Up | Key::Down | Key::Left | Key::Right | Key::Enter | Key::Shift | Key::Tab | Key::Char(' ')
  )
}

pub struct GifPicker {
  mode:        PickerMode,
  input:       SearchInput,
  search_text: String,
  scroll_row:  usize,
  focus:       Option<GridCell>,
  results:     Vec<ResultItem>,
  columns:     usize,
  discard:     bool,
  debouncer:   Debouncer<String>,
  sequence:    RequestSequence,
  pending:     Option<SearchRequest>,
  _keys:       Subscription<Listener>,
}

impl GifPicker {
  /// Mount a panel. The initial search for the default query is queued
  /// right away.
  pub fn new(config: &PickerConfig, listeners: &Subscriptions<Listener>) -> Self {
    let mut picker = Self {
      mode:        PickerMode::Navigation,
      input:       SearchInput::new(),
      search_text: String::new(),
      scroll_row:  0,
      focus:       None,
      results:     Vec::new(),
      columns:     config.columns.max(1),
      discard:     config.discard_stale,
      debouncer:   Debouncer::new(config.debounce),
      sequence:    RequestSequence::new(),
      pending:     None,
      _keys:       listeners.subscribe(Listener::Panel),
    };
    picker.queue_search();
    picker
  }

  pub fn mode(&self) -> PickerMode {
    self.mode
  }

  pub fn is_search_mode(&self) -> bool {
    self.mode == PickerMode::Search
  }

  /// The committed search text (after debouncing).
  pub fn search_text(&self) -> &str {
    &self.search_text
  }

  /// The live text field.
  pub fn input(&self) -> &SearchInput {
    &self.input
  }

  pub fn scroll_row(&self) -> usize {
    self.scroll_row
  }

  pub fn focus(&self) -> Option<GridCell> {
    self.focus
  }

  pub fn results(&self) -> &[ResultItem] {
    &self.results
  }

  pub fn row_count(&self) -> usize {
    row_count(self.results.len(), self.columns)
  }

  pub fn grid(&self) -> GridSource<'_> {
    GridSource::new(&self.results, self.columns, self.scroll_row).with_focus(self.focus)
  }

  pub fn body<'a>(&'a self, i18n: &'a dyn Localizer) -> PanelBody<'a> {
    if self.results.is_empty() {
      PanelBody::Empty(i18n.lookup(localize::EMPTY_RESULTS))
    } else {
      PanelBody::Grid(self.grid())
    }
  }

  pub fn placeholder<'a>(&self, i18n: &'a dyn Localizer) -> Cow<'a, str> {
    i18n.lookup(localize::SEARCH_PLACEHOLDER)
  }

  pub fn set_scroll_row(&mut self, row: usize) {
    self.scroll_row = clamp_row(row, self.row_count());
  }

  pub fn scroll_by(&mut self, delta: isize) {
    self.set_scroll_row(self.scroll_row.saturating_add_signed(delta));
  }

  pub fn handle_key(&mut self, event: KeyEvent, now: Instant) -> PanelOutcome {
    if event.key == Key::Escape {
      return match self.mode {
        PickerMode::Search => {
          self.reset_search();
          PanelOutcome::Handled
        },
        PickerMode::Navigation => PanelOutcome::CloseRequested,
      };
    }

    if self.mode == PickerMode::Search && matches!(event.key, Key::Down | Key::Tab) {
      return self.focus_grid();
    }

    let modifiers = event.modifiers;
    let chord = modifiers.ctrl() || modifiers.super_key() || modifiers.alt();
    if self.mode == PickerMode::Navigation && !chord {
      if is_navigation_key(event.key) {
        return self.navigate(event.key);
      }
      match event.key {
        Key::Char(ch) if is_text_char(ch) => {
          log::debug!("gif picker: entering search mode");
          self.mode = PickerMode::Search;
          // The key goes on to the text field below.
        },
        _ => return PanelOutcome::CloseRequested,
      }
    }

    self.edit(event, now)
  }

  fn edit(&mut self, event: KeyEvent, now: Instant) -> PanelOutcome {
    let modifiers = event.modifiers;
    let changed = match event.key {
      Key::Char(ch) if is_text_char(ch) => {
        if modifiers.ctrl() || modifiers.super_key() || modifiers.alt() {
          return PanelOutcome::Continue;
        }
        self.input.insert(ch);
        true
      },
      Key::Backspace => self.input.delete_backward(),
      Key::Delete => self.input.delete_forward(),
      Key::Left => {
        self.input.move_left();
        false
      },
      Key::Right => {
        self.input.move_right();
        false
      },
      Key::Home => {
        self.input.move_home();
        false
      },
      Key::End => {
        self.input.move_end();
        false
      },
      _ => return PanelOutcome::Continue,
    };

    if changed {
      self
        .debouncer
        .schedule(self.input.text().to_string(), now);
    }
    PanelOutcome::Handled
  }

  /// Leave the text field for the grid, focusing the first cell of the
  /// scrolled-to row. The query and its results stay as they are.
  fn focus_grid(&mut self) -> PanelOutcome {
    if self.results.is_empty() {
      return PanelOutcome::Handled;
    }
    log::debug!("gif picker: focusing the grid");
    self.mode = PickerMode::Navigation;
    let cell = self.clamp_cell(GridCell::new(self.scroll_row, 0));
    self.focus = Some(cell);
    self.scroll_row = cell.row;
    PanelOutcome::Handled
  }

  /// Pick the item under `cell`, e.g. after a pointer press on the grid.
  pub fn pick_cell(&mut self, cell: GridCell) -> PanelOutcome {
    match self.item_at(cell) {
      Some(item) => {
        let item = item.clone();
        self.focus = Some(cell);
        PanelOutcome::Picked(item)
      },
      None => PanelOutcome::Continue,
    }
  }

  fn navigate(&mut self, key: Key) -> PanelOutcome {
    let rows = self.row_count();
    if rows == 0 {
      return PanelOutcome::Continue;
    }

    let next = match (self.focus, key) {
      (None, Key::Up | Key::Down | Key::Left | Key::Right) => GridCell::new(self.scroll_row, 0),
      (Some(cell), Key::Up) => GridCell::new(cell.row.saturating_sub(1), cell.col),
      (Some(cell), Key::Down) => GridCell::new((cell.row + 1).min(rows - 1), cell.col),
      (Some(cell), Key::Left) => GridCell::new(cell.row, cell.col.saturating_sub(1)),
      (Some(cell), Key::Right) => GridCell::new(cell.row, (cell.col + 1).min(self.columns - 1)),
      (Some(cell), Key::Enter) => {
        return match self.item_at(cell) {
          Some(item) => PanelOutcome::Picked(item.clone()),
          None => PanelOutcome::Continue,
        };
      },
      _ => return PanelOutcome::Continue,
    };

    let next = self.clamp_cell(next);
    self.focus = Some(next);
    self.scroll_row = next.row;
    PanelOutcome::Handled
  }

  /// Advance the debouncer. Returns true when a new search text was
  /// committed (and a search queued).
  pub fn tick(&mut self, now: Instant) -> bool {
    match self.debouncer.poll(now) {
      Some(text) => self.commit(text),
      None => false,
    }
  }

  /// When the next debounced commit is due, if one is pending.
  pub fn next_deadline(&self) -> Option<Instant> {
    self.debouncer.deadline()
  }

  pub fn take_search_request(&mut self) -> Option<SearchRequest> {
    self.pending.take()
  }

  /// Put back a request the host could not hand off. Dropped if a newer
  /// search has been queued since.
  pub fn requeue_search(&mut self, request: SearchRequest) {
    if self.pending.is_none() && self.sequence.is_latest(request.seq) {
      self.pending = Some(request);
    }
  }

  /// Replace the result set. Returns false if the response was dropped
  /// because a newer search has been issued since.
  pub fn apply_results(&mut self, seq: u64, items: Vec<ResultItem>) -> bool {
    if self.discard && !self.sequence.is_latest(seq) {
      log::debug!(
        "gif picker: dropping stale results for request {seq} (latest is {})",
        self.sequence.latest()
      );
      return false;
    }

    self.results = items;
    self.scroll_row = clamp_row(self.scroll_row, self.row_count());
    self.focus = self
      .focus
      .filter(|_| !self.results.is_empty())
      .map(|cell| self.clamp_cell(cell));
    true
  }

  fn commit(&mut self, text: String) -> bool {
    if text == self.search_text {
      return false;
    }
    log::debug!("gif picker: committing search text {text:?}");
    self.search_text = text;
    self.scroll_row = 0;
    self.focus = None;
    self.queue_search();
    true
  }

  fn reset_search(&mut self) {
    self.mode = PickerMode::Navigation;
    self.input.clear();
    self.debouncer.cancel();
    self.scroll_row = 0;
    self.focus = None;
    if !self.search_text.is_empty() {
      self.search_text.clear();
      self.queue_search();
    }
  }

  fn queue_search(&mut self) {
    let seq = self.sequence.next();
    self.pending = Some(SearchRequest {
      seq,
      query: self.search_text.clone(),
    });
  }

  fn item_at(&self, cell: GridCell) -> Option<&ResultItem> {
    self.grid().cell(cell.row, cell.col)
  }

  /// Pull a cell back onto an existing item (the last row may be short).
  fn clamp_cell(&self, cell: GridCell) -> GridCell {
    let last = self.results.len().saturating_sub(1);
    let row = clamp_row(cell.row, self.row_count());
    let col = cell.col.min(self.columns - 1);
    if row * self.columns + col > last {
      GridCell::new(row, last - row * self.columns)
    } else {
      GridCell::new(row, col)
    }
  }
}
