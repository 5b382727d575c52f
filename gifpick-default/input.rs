//! Input event types for picker dispatch.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
  bits: u8,
}

impl Modifiers {
  pub const CTRL: u8 = 0b0000_0001;
  pub const ALT: u8 = 0b0000_0010;
  pub const SHIFT: u8 = 0b0000_0100;
  /// Command on macOS, the Windows/logo key elsewhere.
  pub const SUPER: u8 = 0b0000_1000;

  #[must_use]
  pub const fn empty() -> Self {
    Self { bits: 0 }
  }

  #[must_use]
  pub const fn from_bits(bits: u8) -> Self {
    Self { bits }
  }

  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.bits == 0
  }

  #[must_use]
  pub const fn ctrl(self) -> bool {
    (self.bits & Self::CTRL) != 0
  }

  #[must_use]
  pub const fn alt(self) -> bool {
    (self.bits & Self::ALT) != 0
  }

  #[must_use]
  pub const fn shift(self) -> bool {
    (self.bits & Self::SHIFT) != 0
  }

  #[must_use]
  pub const fn super_key(self) -> bool {
    (self.bits & Self::SUPER) != 0
  }

  pub fn insert(&mut self, bits: u8) {
    self.bits |= bits;
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
  Char(char),
  Enter,
  Escape,
  Backspace,
  Tab,
  /// A bare Shift press, reported by hosts that see modifier keys.
  Shift,
  Delete,
  Insert,
  Home,
  End,
  PageUp,
  PageDown,
  Left,
  Right,
  Up,
  Down,
  F(u8),
  Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
  pub key:       Key,
  pub modifiers: Modifiers,
}

impl KeyEvent {
  #[must_use]
  pub const fn new(key: Key) -> Self {
    Self {
      key,
      modifiers: Modifiers::empty(),
    }
  }

  #[must_use]
  pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
    self.modifiers = modifiers;
    self
  }
}

impl From<Key> for KeyEvent {
  fn from(key: Key) -> Self {
    Self::new(key)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
  Left,
  Middle,
  Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
  Down(PointerButton),
  Up(PointerButton),
  Move,
  Scroll,
}

/// A pointer event in the host's cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
  pub kind:     PointerKind,
  pub col:      u16,
  pub row:      u16,
  /// Scroll steps, positive is down. Only meaningful for `Scroll`.
  pub scroll_y: i16,
}

impl PointerEvent {
  #[must_use]
  pub const fn new(kind: PointerKind, col: u16, row: u16) -> Self {
    Self {
      kind,
      col,
      row,
      scroll_y: 0,
    }
  }

  #[must_use]
  pub const fn down(col: u16, row: u16) -> Self {
    Self::new(PointerKind::Down(PointerButton::Left), col, row)
  }

  #[must_use]
  pub const fn with_scroll(mut self, scroll_y: i16) -> Self {
    self.scroll_y = scroll_y;
    self
  }

  #[must_use]
  pub const fn is_press(self) -> bool {
    matches!(self.kind, PointerKind::Down(_))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOutcome {
  /// Not consumed; the host may keep routing the event.
  #[default]
  Continue,
  /// Consumed; default handling is suppressed.
  Handled,
}

impl KeyOutcome {
  #[must_use]
  pub const fn handled(self) -> bool {
    matches!(self, Self::Handled)
  }

  #[must_use]
  pub const fn from_handled(handled: bool) -> Self {
    if handled { Self::Handled } else { Self::Continue }
  }
}

/// Kinds of events a mounted component listens for. Hosts route an event
/// kind only while some component holds a subscription for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
  /// The global open/close chord, held for the button's whole lifetime.
  Shortcut,
  /// Pointer presses anywhere, held while the popover is open.
  OutsideClick,
  /// Keys, wheel and grid presses for the panel, held while the picker is
  /// mounted.
  Panel,
}
