use std::{
  cell::RefCell,
  rc::Rc,
  time::{
    Duration,
    Instant,
  },
};

use crossterm::event::{
  self,
  Event,
};
use eyre::Result;
use gifpick_default::{
  GifButton,
  Listener,
  PickerConfig,
  PickerHooks,
  SearchRequest,
  SearchResponse,
};
use gifpick_event::{
  Subscriptions,
  send_blocking,
};
use gifpick_loader::{
  Config,
  SearchSection,
};
use gifpick_search::{
  ResultItem,
  SearchOptions,
};
use tokio::sync::mpsc::{
  Receiver,
  Sender,
  error::TryRecvError,
};

use crate::{
  input,
  render,
  terminal::Terminal,
};

/// Longest the loop waits for input when nothing is scheduled, so finished
/// searches still show up promptly.
const IDLE_POLL: Duration = Duration::from_millis(50);

pub fn picker_config(config: &Config) -> PickerConfig {
  PickerConfig {
    debounce:      Duration::from_millis(config.picker.debounce_ms),
    columns:       config.picker.columns,
    close_on_pick: config.picker.close_on_pick,
    discard_stale: config.search.discard_stale,
    shortcut_key:  config.shortcut.key,
  }
}

/// Search client options from config, with command line and environment
/// overrides already resolved by the caller.
pub fn search_options(
  search: &SearchSection,
  api_key: Option<String>,
  base_url: Option<String>,
) -> SearchOptions {
  SearchOptions {
    base_url:      base_url.unwrap_or_else(|| search.base_url.clone()),
    api_key:       api_key.unwrap_or_else(|| search.api_key.clone()),
    default_query: search.default_query.clone(),
    timeout:       search.timeout_ms.map(Duration::from_millis),
  }
}

/// Collects picked GIFs for the composer.
#[derive(Clone, Default)]
struct SentItems {
  items: Rc<RefCell<Vec<ResultItem>>>,
}

impl PickerHooks for SentItems {
  fn on_close(&mut self) {
    log::debug!("picker closed");
  }

  fn on_pick(&mut self, item: &ResultItem) {
    log::info!("sent {} ({})", item.id, item.preview_url);
    self.items.borrow_mut().push(item.clone());
  }
}

pub struct App {
  pub button:       GifButton,
  pub show_help:    bool,
  pub should_quit:  bool,
  pub needs_render: bool,
  sent:             SentItems,
  listeners:        Subscriptions<Listener>,
  requests:         Sender<SearchRequest>,
  responses:        Receiver<SearchResponse>,
}

impl App {
  pub fn new(
    config: &Config,
    requests: Sender<SearchRequest>,
    responses: Receiver<SearchResponse>,
  ) -> Self {
    let listeners = Subscriptions::new();
    let sent = SentItems::default();
    let mut button = GifButton::new(picker_config(config), &listeners).with_hooks(sent.clone());
    button.set_shortcut_enabled(config.shortcut.enabled);
    Self {
      button,
      show_help: false,
      should_quit: false,
      needs_render: true,
      sent,
      listeners,
      requests,
      responses,
    }
  }

  /// Registry the button and its panel subscribe into.
  pub fn listeners(&self) -> &Subscriptions<Listener> {
    &self.listeners
  }

  pub fn sent(&self) -> Vec<ResultItem> {
    self.sent.items.borrow().clone()
  }

  /// How many overlay panels are on screen.
  pub fn overlay_count(&self) -> usize {
    usize::from(self.show_help) + usize::from(self.button.is_open())
  }

  pub fn run(&mut self, terminal: &mut Terminal) -> Result<()> {
    while !self.should_quit {
      let now = Instant::now();
      if self.button.tick(now) {
        self.needs_render = true;
      }
      self.dispatch_requests();
      self.drain_responses();

      if self.needs_render {
        render::render(self, terminal)?;
        self.needs_render = false;
      }

      if event::poll(self.poll_timeout(Instant::now()))? {
        match event::read()? {
          Event::Key(key) => input::handle_key(self, key),
          Event::Mouse(mouse) => input::handle_mouse(self, mouse),
          Event::Resize(..) => self.needs_render = true,
          _ => {},
        }
      }
    }
    Ok(())
  }

  fn poll_timeout(&self, now: Instant) -> Duration {
    self
      .button
      .next_deadline()
      .map_or(IDLE_POLL, |deadline| {
        deadline.saturating_duration_since(now).min(IDLE_POLL)
      })
  }

  fn dispatch_requests(&mut self) {
    if let Some(request) = self.button.take_search_request() {
      if let Some(request) = send_blocking(&self.requests, request) {
        self.button.requeue_search(request);
      }
    }
  }

  fn drain_responses(&mut self) {
    loop {
      match self.responses.try_recv() {
        Ok(response) => {
          if self.button.apply_results(response.seq, response.items) {
            self.needs_render = true;
          }
        },
        Err(TryRecvError::Empty) => break,
        Err(TryRecvError::Disconnected) => {
          log::error!("search worker stopped");
          self.should_quit = true;
          break;
        },
      }
    }
  }
}
