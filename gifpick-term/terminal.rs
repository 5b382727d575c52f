//! Terminal abstraction using ratatui + crossterm backend.

use std::io::{
  self,
  Stdout,
};

use crossterm::{
  event::{
    DisableMouseCapture,
    EnableMouseCapture,
    KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
  },
  execute,
  terminal::{
    EnterAlternateScreen,
    LeaveAlternateScreen,
    disable_raw_mode,
    enable_raw_mode,
    supports_keyboard_enhancement,
  },
};
use eyre::Result;
use ratatui::{
  Terminal as RatatuiTerminal,
  backend::CrosstermBackend,
};

pub struct Terminal {
  terminal: RatatuiTerminal<CrosstermBackend<Stdout>>,
  /// Whether the kitty keyboard protocol was pushed and needs popping.
  enhanced: bool,
}

impl Terminal {
  pub fn new() -> Result<Self> {
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = RatatuiTerminal::new(backend)?;
    Ok(Self {
      terminal,
      enhanced: false,
    })
  }

  pub fn enter_raw_mode(&mut self) -> Result<()> {
    enable_raw_mode()?;
    execute!(
      self.terminal.backend_mut(),
      EnterAlternateScreen,
      EnableMouseCapture
    )?;
    // Legacy encoding sends Ctrl+Shift+I as Tab and never reports Shift on
    // its own.
    self.enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if self.enhanced {
      execute!(
        self.terminal.backend_mut(),
        PushKeyboardEnhancementFlags(
          KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
            | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        )
      )?;
    } else {
      log::warn!("terminal lacks keyboard enhancement; the shortcut may arrive as Tab");
    }
    Ok(())
  }

  pub fn leave_raw_mode(&mut self) -> Result<()> {
    if std::mem::take(&mut self.enhanced) {
      execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    execute!(
      self.terminal.backend_mut(),
      DisableMouseCapture,
      LeaveAlternateScreen
    )?;
    disable_raw_mode()?;
    self.terminal.show_cursor()?;
    Ok(())
  }

  pub fn draw<F>(&mut self, f: F) -> Result<()>
  where
    F: FnOnce(&mut ratatui::Frame<'_>),
  {
    self.terminal.draw(f)?;
    Ok(())
  }
}
