//! The trigger button and the popover it anchors.
//!
//! `GifButton` is the only owner of the open state. Opening mounts a fresh
//! [`GifPicker`]; closing drops it. The popover closes on a pointer press
//! outside both the trigger and the panel, when the panel asks to, and when
//! the global shortcut is pressed again.
//!
//! Keys and pointer events are delivered to the live subscriptions in the
//! shared registry, newest first, until one handles them. Dropping a guard
//! therefore stops delivery for that listener.

use std::{
  borrow::Cow,
  sync::Arc,
  time::Instant,
};

use gifpick_event::{
  Subscription,
  Subscriptions,
};
use gifpick_search::ResultItem;

use crate::{
  EnglishLocalizer,
  KeyEvent,
  KeyOutcome,
  Listener,
  Localizer,
  NoHooks,
  PickerHooks,
  PointerEvent,
  PointerKind,
  localize,
  overlay_layout::{
    OverlayRect,
    anchored_panel_rect,
  },
  grid::GridCell,
  picker::{
    GifPicker,
    PanelOutcome,
    PickerConfig,
    SearchRequest,
  },
  shortcut::{
    Platform,
    Shortcut,
  },
};

pub struct GifButton {
  config:        PickerConfig,
  shortcut:      Shortcut,
  hooks:         Box<dyn PickerHooks>,
  i18n:          Arc<dyn Localizer>,
  listeners:     Subscriptions<Listener>,
  trigger:       OverlayRect,
  panel_rect:    Option<OverlayRect>,
  grid_area:     Option<OverlayRect>,
  picker:        Option<GifPicker>,
  outside_click: Option<Subscription<Listener>>,
  shortcut_sub:  Option<Subscription<Listener>>,
}

impl GifButton {
  pub fn new(config: PickerConfig, listeners: &Subscriptions<Listener>) -> Self {
    Self {
      shortcut: Shortcut::new(config.shortcut_key, Platform::current()),
      config,
      hooks: Box::new(NoHooks),
      i18n: Arc::new(EnglishLocalizer),
      listeners: listeners.clone(),
      trigger: OverlayRect::default(),
      panel_rect: None,
      grid_area: None,
      picker: None,
      outside_click: None,
      shortcut_sub: Some(listeners.subscribe(Listener::Shortcut)),
    }
  }

  pub fn with_hooks(mut self, hooks: impl PickerHooks + 'static) -> Self {
    self.hooks = Box::new(hooks);
    self
  }

  pub fn with_localizer(mut self, i18n: Arc<dyn Localizer>) -> Self {
    self.i18n = i18n;
    self
  }

  pub fn with_platform(mut self, platform: Platform) -> Self {
    self.shortcut = Shortcut::new(self.config.shortcut_key, platform);
    self
  }

  /// Release or reacquire the global shortcut subscription.
  pub fn set_shortcut_enabled(&mut self, enabled: bool) {
    match (enabled, self.shortcut_sub.is_some()) {
      (true, false) => self.shortcut_sub = Some(self.listeners.subscribe(Listener::Shortcut)),
      (false, true) => self.shortcut_sub = None,
      _ => {},
    }
  }

  pub fn is_open(&self) -> bool {
    self.picker.is_some()
  }

  pub fn picker(&self) -> Option<&GifPicker> {
    self.picker.as_ref()
  }

  pub fn picker_mut(&mut self) -> Option<&mut GifPicker> {
    self.picker.as_mut()
  }

  pub fn shortcut(&self) -> Shortcut {
    self.shortcut
  }

  pub fn localizer(&self) -> &dyn Localizer {
    self.i18n.as_ref()
  }

  /// Accessible label for the trigger control.
  pub fn label(&self) -> Cow<'_, str> {
    self.i18n.lookup(localize::BUTTON_LABEL)
  }

  pub fn trigger_rect(&self) -> OverlayRect {
    self.trigger
  }

  pub fn set_trigger_rect(&mut self, rect: OverlayRect) {
    self.trigger = rect;
  }

  pub fn panel_rect(&self) -> Option<OverlayRect> {
    self.panel_rect
  }

  /// Where the host drew the result grid, for pointer picks. Cleared on
  /// close.
  pub fn set_grid_area(&mut self, area: Option<OverlayRect>) {
    self.grid_area = area.filter(|_| self.is_open());
  }

  /// Lay the panel out above the trigger (flipping below if needed) and
  /// remember where it went for outside-click checks. `None` while closed.
  pub fn place_panel(&mut self, viewport: OverlayRect, width: u16, height: u16) -> Option<OverlayRect> {
    if !self.is_open() {
      return None;
    }
    let rect = anchored_panel_rect(viewport, self.trigger, width, height);
    self.panel_rect = Some(rect);
    Some(rect)
  }

  pub fn open(&mut self) {
    if self.is_open() {
      return;
    }
    log::debug!("gif button: opening picker");
    self.picker = Some(GifPicker::new(&self.config, &self.listeners));
    self.outside_click = Some(self.listeners.subscribe(Listener::OutsideClick));
  }

  pub fn close(&mut self) {
    if self.picker.take().is_none() {
      return;
    }
    log::debug!("gif button: closing picker");
    self.outside_click = None;
    self.panel_rect = None;
    self.grid_area = None;
    self.hooks.on_close();
  }

  pub fn toggle(&mut self) {
    if self.is_open() {
      self.close();
    } else {
      self.open();
    }
  }

  /// Trigger activation (click, or Enter/Space while the trigger is focused).
  pub fn click_trigger(&mut self) {
    self.toggle();
  }

  /// Route a key press. `active_overlays` is how many overlay panels the
  /// surrounding UI currently shows; with more than one the global shortcut
  /// is ignored.
  pub fn handle_key(&mut self, event: KeyEvent, now: Instant, active_overlays: usize) -> KeyOutcome {
    for listener in self.listeners.active() {
      let outcome = match listener {
        Listener::Panel => self.panel_key(event, now),
        Listener::Shortcut => self.shortcut_key(&event, active_overlays),
        Listener::OutsideClick => KeyOutcome::Continue,
      };
      if outcome.handled() {
        return outcome;
      }
    }
    KeyOutcome::Continue
  }

  /// Route a pointer event. Presses on the trigger toggle the popover;
  /// presses outside both the trigger and the panel close it.
  pub fn handle_pointer(&mut self, event: PointerEvent) -> KeyOutcome {
    if event.is_press() && self.trigger.contains(event.col, event.row) {
      self.click_trigger();
      return KeyOutcome::Handled;
    }
    for listener in self.listeners.active() {
      let outcome = match listener {
        Listener::OutsideClick => self.outside_pointer(&event),
        Listener::Panel => self.panel_pointer(&event),
        Listener::Shortcut => KeyOutcome::Continue,
      };
      if outcome.handled() {
        return outcome;
      }
    }
    KeyOutcome::Continue
  }

  fn shortcut_key(&mut self, event: &KeyEvent, active_overlays: usize) -> KeyOutcome {
    if !self.shortcut.matches(event) {
      return KeyOutcome::Continue;
    }
    if active_overlays > 1 {
      log::debug!("gif button: shortcut ignored with {active_overlays} overlays open");
      return KeyOutcome::Continue;
    }
    self.toggle();
    KeyOutcome::Handled
  }

  fn panel_key(&mut self, event: KeyEvent, now: Instant) -> KeyOutcome {
    match self.picker.as_mut() {
      Some(picker) => {
        let outcome = picker.handle_key(event, now);
        self.resolve(outcome)
      },
      None => KeyOutcome::Continue,
    }
  }

  fn outside_pointer(&mut self, event: &PointerEvent) -> KeyOutcome {
    let inside_panel = self
      .panel_rect
      .is_some_and(|rect| rect.contains(event.col, event.row));
    if !event.is_press() || inside_panel {
      return KeyOutcome::Continue;
    }
    self.close();
    KeyOutcome::Handled
  }

  fn panel_pointer(&mut self, event: &PointerEvent) -> KeyOutcome {
    let inside_panel = self
      .panel_rect
      .is_some_and(|rect| rect.contains(event.col, event.row));
    if !inside_panel {
      return KeyOutcome::Continue;
    }
    if event.kind == PointerKind::Scroll {
      if let Some(picker) = self.picker.as_mut() {
        picker.scroll_by(isize::from(event.scroll_y));
        return KeyOutcome::Handled;
      }
      return KeyOutcome::Continue;
    }
    if !event.is_press() {
      return KeyOutcome::Continue;
    }
    match self.grid_cell_at(event.col, event.row) {
      Some(cell) => {
        let outcome = match self.picker.as_mut() {
          Some(picker) => picker.pick_cell(cell),
          None => PanelOutcome::Continue,
        };
        self.resolve(outcome)
      },
      None => KeyOutcome::Continue,
    }
  }

  fn grid_cell_at(&self, col: u16, row: u16) -> Option<GridCell> {
    let area = self.grid_area.filter(|area| area.contains(col, row))?;
    let picker = self.picker.as_ref()?;
    picker
      .grid()
      .cell_at(col - area.x, row - area.y, area.width, area.height)
  }

  /// Act on what the panel asked for.
  fn resolve(&mut self, outcome: PanelOutcome) -> KeyOutcome {
    match outcome {
      PanelOutcome::Continue => KeyOutcome::Continue,
      PanelOutcome::Handled => KeyOutcome::Handled,
      PanelOutcome::CloseRequested => {
        self.close();
        KeyOutcome::Handled
      },
      PanelOutcome::Picked(item) => {
        self.pick(&item);
        KeyOutcome::Handled
      },
    }
  }

  pub fn pick(&mut self, item: &ResultItem) {
    log::debug!("gif button: picked {}", item.id);
    self.hooks.on_pick(item);
    if self.config.close_on_pick {
      self.close();
    }
  }

  /// Advance the panel's debouncer.
  pub fn tick(&mut self, now: Instant) -> bool {
    self
      .picker
      .as_mut()
      .is_some_and(|picker| picker.tick(now))
  }

  pub fn next_deadline(&self) -> Option<Instant> {
    self.picker.as_ref().and_then(GifPicker::next_deadline)
  }

  pub fn take_search_request(&mut self) -> Option<SearchRequest> {
    self.picker.as_mut().and_then(GifPicker::take_search_request)
  }

  /// Hand back a request the host failed to dispatch so it goes out again.
  pub fn requeue_search(&mut self, request: SearchRequest) {
    if let Some(picker) = self.picker.as_mut() {
      picker.requeue_search(request);
    }
  }

  /// Hand a finished search to the panel. Responses arriving after the
  /// panel was closed are dropped.
  pub fn apply_results(&mut self, seq: u64, items: Vec<ResultItem>) -> bool {
    self
      .picker
      .as_mut()
      .is_some_and(|picker| picker.apply_results(seq, items))
  }
}

#[cfg(test)]
mod tests {
  use std::{
    cell::RefCell,
    rc::Rc,
    time::Instant,
  };

  use gifpick_event::Subscriptions;
  use gifpick_search::ResultItem;

  use super::GifButton;
  use crate::{
    Key,
    KeyEvent,
    KeyOutcome,
    Listener,
    Modifiers,
    PickerConfig,
    PickerHooks,
    PointerEvent,
    overlay_layout::OverlayRect,
    shortcut::Platform,
  };

  #[derive(Clone, Default)]
  struct Recorder {
    closes: Rc<RefCell<usize>>,
    picks:  Rc<RefCell<Vec<String>>>,
  }

  impl PickerHooks for Recorder {
    fn on_close(&mut self) {
      *self.closes.borrow_mut() += 1;
    }

    fn on_pick(&mut self, item: &ResultItem) {
      self.picks.borrow_mut().push(item.id.clone());
    }
  }

  fn button(recorder: &Recorder, listeners: &Subscriptions<Listener>) -> GifButton {
    let mut button = GifButton::new(PickerConfig::default(), listeners)
      .with_hooks(recorder.clone())
      .with_platform(Platform::Other);
    button.set_trigger_rect(OverlayRect::new(0, 29, 5, 1));
    button
  }

  fn open_with_panel(button: &mut GifButton) {
    button.click_trigger();
    let viewport = OverlayRect::new(0, 0, 80, 30);
    button.place_panel(viewport, 40, 20).unwrap();
  }

  fn shortcut() -> KeyEvent {
    KeyEvent::new(Key::Char('I')).with_modifiers(Modifiers::from_bits(Modifiers::CTRL | Modifiers::SHIFT))
  }

  #[test]
  fn trigger_toggles_and_mounts_the_panel() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    assert!(listeners.contains(&Listener::Shortcut));
    assert!(!button.is_open());

    button.click_trigger();
    assert!(button.is_open());
    assert!(listeners.contains(&Listener::OutsideClick));
    assert!(listeners.contains(&Listener::Panel));

    button.click_trigger();
    assert!(!button.is_open());
    assert_eq!(listeners.active(), vec![Listener::Shortcut]);
    assert_eq!(*recorder.closes.borrow(), 1);
  }

  #[test]
  fn outside_press_closes_exactly_once() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    open_with_panel(&mut button);

    assert_eq!(button.handle_pointer(PointerEvent::down(70, 2)), KeyOutcome::Handled);
    assert!(!button.is_open());
    assert_eq!(button.handle_pointer(PointerEvent::down(70, 2)), KeyOutcome::Continue);
    assert_eq!(*recorder.closes.borrow(), 1);
  }

  #[test]
  fn presses_inside_the_panel_keep_it_open() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    open_with_panel(&mut button);

    let panel = button.panel_rect().unwrap();
    button.handle_pointer(PointerEvent::down(panel.x + 1, panel.y + 1));
    assert!(button.is_open());
    assert_eq!(*recorder.closes.borrow(), 0);
  }

  #[test]
  fn panel_close_request_goes_through_the_owner() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    button.click_trigger();

    let outcome = button.handle_key(KeyEvent::new(Key::Escape), Instant::now(), 0);
    assert_eq!(outcome, KeyOutcome::Handled);
    assert!(!button.is_open());
    assert_eq!(*recorder.closes.borrow(), 1);
  }

  #[test]
  fn shortcut_toggles_unless_overlays_are_busy() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    let now = Instant::now();

    assert_eq!(button.handle_key(shortcut(), now, 2), KeyOutcome::Continue);
    assert!(!button.is_open());

    assert_eq!(button.handle_key(shortcut(), now, 1), KeyOutcome::Handled);
    assert!(button.is_open());
    assert_eq!(button.handle_key(shortcut(), now, 1), KeyOutcome::Handled);
    assert!(!button.is_open());
    assert_eq!(*recorder.closes.borrow(), 1);
  }

  #[test]
  fn picking_notifies_and_closes() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    button.click_trigger();
    let request = button.take_search_request().unwrap();
    let item = ResultItem {
      id:          "g1".into(),
      title:       "wave".into(),
      preview_url: "https://media/g1.webp".into(),
    };
    assert!(button.apply_results(request.seq, vec![item]));

    let now = Instant::now();
    button.handle_key(KeyEvent::new(Key::Down), now, 0);
    button.handle_key(KeyEvent::new(Key::Enter), now, 0);

    assert_eq!(*recorder.picks.borrow(), vec!["g1".to_string()]);
    assert!(!button.is_open());
    assert_eq!(*recorder.closes.borrow(), 1);
  }

  #[test]
  fn results_after_close_are_dropped() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    button.click_trigger();
    let request = button.take_search_request().unwrap();
    button.close();
    assert!(!button.apply_results(request.seq, Vec::new()));
    assert!(button.take_search_request().is_none());
  }

  fn open_with_results(button: &mut GifButton, count: usize) {
    open_with_panel(button);
    let request = button.take_search_request().unwrap();
    let items = (0..count)
      .map(|i| {
        ResultItem {
          id:          format!("g{i}"),
          title:       format!("gif {i}"),
          preview_url: format!("https://media/g{i}.webp"),
        }
      })
      .collect();
    assert!(button.apply_results(request.seq, items));
  }

  #[test]
  fn pressing_a_grid_cell_picks_it() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    open_with_results(&mut button, 5);
    let panel = button.panel_rect().unwrap();
    let grid = OverlayRect::new(panel.x + 1, panel.y + 2, 20, 4);
    button.set_grid_area(Some(grid));

    // Right column of the second row.
    let outcome = button.handle_pointer(PointerEvent::down(grid.x + 12, grid.y + 1));
    assert_eq!(outcome, KeyOutcome::Handled);
    assert_eq!(*recorder.picks.borrow(), vec!["g3".to_string()]);
    assert!(!button.is_open());
  }

  #[test]
  fn pressing_an_empty_grid_slot_does_nothing() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    open_with_results(&mut button, 5);
    let panel = button.panel_rect().unwrap();
    let grid = OverlayRect::new(panel.x + 1, panel.y + 2, 20, 4);
    button.set_grid_area(Some(grid));

    let outcome = button.handle_pointer(PointerEvent::down(grid.x + 12, grid.y + 2));
    assert_eq!(outcome, KeyOutcome::Continue);
    assert!(button.is_open());
    assert!(recorder.picks.borrow().is_empty());
  }

  #[test]
  fn disabled_shortcut_is_not_delivered() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    let now = Instant::now();

    button.set_shortcut_enabled(false);
    assert!(listeners.is_empty());
    assert_eq!(button.handle_key(shortcut(), now, 0), KeyOutcome::Continue);
    assert!(!button.is_open());

    button.set_shortcut_enabled(true);
    assert_eq!(button.handle_key(shortcut(), now, 0), KeyOutcome::Handled);
    assert!(button.is_open());
  }

  #[test]
  fn shortcut_still_closes_while_typing() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    let now = Instant::now();
    button.click_trigger();
    button.handle_key(KeyEvent::new(Key::Char('c')), now, 1);
    assert!(button.picker().unwrap().is_search_mode());

    assert_eq!(button.handle_key(shortcut(), now, 1), KeyOutcome::Handled);
    assert!(!button.is_open());
    assert_eq!(button.handle_key(KeyEvent::new(Key::Char('d')), now, 1), KeyOutcome::Continue);
    assert_eq!(*recorder.closes.borrow(), 1);
  }

  #[test]
  fn requeued_request_goes_out_again() {
    let recorder = Recorder::default();
    let listeners = Subscriptions::new();
    let mut button = button(&recorder, &listeners);
    button.click_trigger();
    let request = button.take_search_request().unwrap();
    button.requeue_search(request.clone());
    assert_eq!(button.take_search_request(), Some(request));
  }
}
