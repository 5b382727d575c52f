//! Input handling - maps crossterm events onto the popover.

use std::time::Instant;

use crossterm::event::{
  KeyCode,
  KeyEvent as CrosstermKeyEvent,
  KeyEventKind,
  KeyModifiers,
  ModifierKeyCode,
  MouseButton,
  MouseEvent,
  MouseEventKind,
};
use gifpick_default::{
  Key,
  KeyEvent,
  KeyOutcome,
  Modifiers,
  PointerButton,
  PointerEvent,
  PointerKind,
};

use crate::app::App;

pub fn handle_key(app: &mut App, event: CrosstermKeyEvent) {
  if event.kind != KeyEventKind::Press {
    return;
  }
  app.needs_render = true;

  let key_event = KeyEvent::new(to_key(event.code)).with_modifiers(to_modifiers(event.modifiers));
  if key_event.modifiers.ctrl() && key_event.key == Key::Char('c') {
    app.should_quit = true;
    return;
  }
  if key_event.key == Key::F(1) {
    app.show_help = !app.show_help;
    return;
  }
  if app.show_help && key_event.key == Key::Escape {
    app.show_help = false;
    return;
  }

  let outcome = app
    .button
    .handle_key(key_event, Instant::now(), app.overlay_count());
  if outcome == KeyOutcome::Handled || app.button.is_open() {
    return;
  }

  // With the popover closed the trigger has focus.
  match key_event.key {
    Key::Enter | Key::Char(' ') => app.button.click_trigger(),
    Key::Char('q') if key_event.modifiers.is_empty() => app.should_quit = true,
    _ => {},
  }
}

pub fn handle_mouse(app: &mut App, event: MouseEvent) {
  let Some(pointer) = to_pointer(event) else {
    return;
  };
  if app.button.handle_pointer(pointer).handled() {
    app.needs_render = true;
  }
}

fn to_key(code: KeyCode) -> Key {
  match code {
    KeyCode::Char(c) => Key::Char(c),
    KeyCode::Enter => Key::Enter,
    KeyCode::Tab | KeyCode::BackTab => Key::Tab,
    KeyCode::Esc => Key::Escape,
    KeyCode::Backspace => Key::Backspace,
    KeyCode::Delete => Key::Delete,
    KeyCode::Insert => Key::Insert,
    KeyCode::Home => Key::Home,
    KeyCode::End => Key::End,
    KeyCode::PageUp => Key::PageUp,
    KeyCode::PageDown => Key::PageDown,
    KeyCode::Left => Key::Left,
    KeyCode::Right => Key::Right,
    KeyCode::Up => Key::Up,
    KeyCode::Down => Key::Down,
    KeyCode::F(n) => Key::F(n),
    KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift) => Key::Shift,
    _ => Key::Other,
  }
}

fn to_modifiers(modifiers: KeyModifiers) -> Modifiers {
  let mut out = Modifiers::empty();
  if modifiers.contains(KeyModifiers::CONTROL) {
    out.insert(Modifiers::CTRL);
  }
  if modifiers.contains(KeyModifiers::ALT) {
    out.insert(Modifiers::ALT);
  }
  if modifiers.contains(KeyModifiers::SHIFT) {
    out.insert(Modifiers::SHIFT);
  }
  if modifiers.contains(KeyModifiers::SUPER) {
    out.insert(Modifiers::SUPER);
  }
  out
}

fn to_button(button: MouseButton) -> PointerButton {
  match button {
    MouseButton::Left => PointerButton::Left,
    MouseButton::Middle => PointerButton::Middle,
    MouseButton::Right => PointerButton::Right,
  }
}

fn to_pointer(event: MouseEvent) -> Option<PointerEvent> {
  let (kind, scroll_y) = match event.kind {
    MouseEventKind::Down(button) => (PointerKind::Down(to_button(button)), 0),
    MouseEventKind::Up(button) => (PointerKind::Up(to_button(button)), 0),
    MouseEventKind::Moved | MouseEventKind::Drag(_) => (PointerKind::Move, 0),
    MouseEventKind::ScrollDown => (PointerKind::Scroll, 1),
    MouseEventKind::ScrollUp => (PointerKind::Scroll, -1),
    MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
  };
  Some(PointerEvent::new(kind, event.column, event.row).with_scroll(scroll_y))
}
