use crate::{
  Key,
  KeyEvent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
  MacOs,
  Other,
}

impl Platform {
  pub const fn current() -> Self {
    if cfg!(target_os = "macos") {
      Self::MacOs
    } else {
      Self::Other
    }
  }
}

/// The global chord that toggles the popover: the platform's command
/// modifier (Super on macOS, Ctrl elsewhere) plus Shift plus a letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
  key:      char,
  platform: Platform,
}

impl Shortcut {
  pub const fn new(key: char, platform: Platform) -> Self {
    Self { key, platform }
  }

  pub const fn key(&self) -> char {
    self.key
  }

  pub const fn platform(&self) -> Platform {
    self.platform
  }

  pub fn matches(&self, event: &KeyEvent) -> bool {
    let modifiers = event.modifiers;
    let command = match self.platform {
      Platform::MacOs => modifiers.super_key(),
      Platform::Other => modifiers.ctrl(),
    };
    command
      && modifiers.shift()
      && matches!(event.key, Key::Char(ch) if ch.eq_ignore_ascii_case(&self.key))
  }

  /// Human readable form, e.g. `Ctrl+Shift+I`.
  pub fn label(&self) -> String {
    let command = match self.platform {
      Platform::MacOs => "Cmd",
      Platform::Other => "Ctrl",
    };
    format!("{command}+Shift+{}", self.key.to_ascii_uppercase())
  }
}
