use unicode_segmentation::{
  GraphemeCursor,
  UnicodeSegmentation,
};

/// The picker's text field: contents plus a byte cursor that always sits on a
/// grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
  text:   String,
  cursor: usize,
}

impl SearchInput {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn text(&self) -> &str {
    &self.text
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  /// Cursor position counted in graphemes, for hosts that draw a caret.
  pub fn cursor_graphemes(&self) -> usize {
    self.text[..self.cursor].graphemes(true).count()
  }

  pub fn is_empty(&self) -> bool {
    self.text.is_empty()
  }

  pub fn clear(&mut self) {
    self.text.clear();
    self.cursor = 0;
  }

  pub fn insert(&mut self, ch: char) {
    self.text.insert(self.cursor, ch);
    self.cursor += ch.len_utf8();
    // A combining mark may have merged with the previous grapheme.
    self.cursor = self.next_boundary(self.prev_boundary(self.cursor));
  }

  /// Remove the grapheme before the cursor. Returns whether text changed.
  pub fn delete_backward(&mut self) -> bool {
    if self.cursor == 0 {
      return false;
    }
    let prev = self.prev_boundary(self.cursor);
    self.text.replace_range(prev..self.cursor, "");
    self.cursor = prev;
    true
  }

  /// Remove the grapheme after the cursor. Returns whether text changed.
  pub fn delete_forward(&mut self) -> bool {
    if self.cursor >= self.text.len() {
      return false;
    }
    let next = self.next_boundary(self.cursor);
    self.text.replace_range(self.cursor..next, "");
    true
  }

  pub fn move_left(&mut self) {
    self.cursor = self.prev_boundary(self.cursor);
  }

  pub fn move_right(&mut self) {
    self.cursor = self.next_boundary(self.cursor);
  }

  pub fn move_home(&mut self) {
    self.cursor = 0;
  }

  pub fn move_end(&mut self) {
    self.cursor = self.text.len();
  }

  fn prev_boundary(&self, at: usize) -> usize {
    let mut cursor = GraphemeCursor::new(at, self.text.len(), true);
    cursor
      .prev_boundary(&self.text, 0)
      .ok()
      .flatten()
      .unwrap_or(0)
  }

  fn next_boundary(&self, at: usize) -> usize {
    let mut cursor = GraphemeCursor::new(at, self.text.len(), true);
    cursor
      .next_boundary(&self.text, 0)
      .ok()
      .flatten()
      .unwrap_or(self.text.len())
  }
}

/// Whether `ch` is something a user types, as opposed to a control code.
pub fn is_text_char(ch: char) -> bool {
  !ch.is_control()
}

#[cfg(test)]
mod tests {
  use super::SearchInput;

  fn typed(text: &str) -> SearchInput {
    let mut input = SearchInput::new();
    text.chars().for_each(|ch| input.insert(ch));
    input
  }

  #[test]
  fn edits_at_the_cursor() {
    let mut input = typed("cat");
    input.move_left();
    input.insert('r');
    assert_eq!(input.text(), "cart");
    assert!(input.delete_backward());
    assert_eq!(input.text(), "cat");
    assert!(input.delete_forward());
    assert_eq!(input.text(), "ca");
    assert!(!input.delete_forward());
    input.move_home();
    assert!(!input.delete_backward());
  }

  #[test]
  fn backspace_removes_whole_graphemes() {
    let mut input = typed("ok👍🏽");
    assert_eq!(input.cursor_graphemes(), 3);
    assert!(input.delete_backward());
    assert_eq!(input.text(), "ok");
  }

  #[test]
  fn combining_marks_join_the_previous_grapheme() {
    let mut input = typed("e\u{301}");
    assert_eq!(input.cursor(), input.text().len());
    input.move_left();
    assert_eq!(input.cursor(), 0);
  }
}
