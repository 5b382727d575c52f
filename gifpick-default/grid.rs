use std::ops::Range;

use gifpick_search::ResultItem;

/// Default number of results per row.
pub const COLUMN_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCell {
  pub row: usize,
  pub col: usize,
}

impl GridCell {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }
}

/// Number of rows needed to lay `len` items out `columns` wide.
pub fn row_count(len: usize, columns: usize) -> usize {
  len.div_ceil(columns.max(1))
}

/// Clamp `row` into `[0, row_count - 1]`, or 0 when there are no rows.
pub fn clamp_row(row: usize, row_count: usize) -> usize {
  row.min(row_count.saturating_sub(1))
}

/// What a virtualized grid needs from the picker: dimensions, a cell lookup,
/// and where to scroll. Hosts materialize only the rows they can show.
#[derive(Debug, Clone, Copy)]
pub struct GridSource<'a> {
  items:         &'a [ResultItem],
  columns:       usize,
  scroll_to_row: usize,
  focus:         Option<GridCell>,
}

impl<'a> GridSource<'a> {
  pub fn new(items: &'a [ResultItem], columns: usize, scroll_to_row: usize) -> Self {
    let columns = columns.max(1);
    Self {
      items,
      columns,
      scroll_to_row: clamp_row(scroll_to_row, row_count(items.len(), columns)),
      focus: None,
    }
  }

  pub fn with_focus(mut self, focus: Option<GridCell>) -> Self {
    self.focus = focus;
    self
  }

  pub fn row_count(&self) -> usize {
    row_count(self.items.len(), self.columns)
  }

  pub fn column_count(&self) -> usize {
    self.columns
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Item at `(row, col)`; `None` past the end of a short last row.
  pub fn cell(&self, row: usize, col: usize) -> Option<&'a ResultItem> {
    if col >= self.columns {
      return None;
    }
    self.items.get(row * self.columns + col)
  }

  pub fn row(&self, row: usize) -> &'a [ResultItem] {
    self.items.chunks(self.columns).nth(row).unwrap_or(&[])
  }

  /// Always within `[0, row_count - 1]` when there are rows.
  pub fn scroll_to_row(&self) -> usize {
    self.scroll_to_row
  }

  pub fn focus(&self) -> Option<GridCell> {
    self.focus
  }

  /// Rows to materialize for a viewport `visible` rows tall, starting at the
  /// scroll target with the viewport pulled back to stay full near the end.
  pub fn visible_rows(&self, visible: usize) -> Range<usize> {
    let total = self.row_count();
    let visible = visible.min(total);
    let start = self.scroll_to_row.min(total - visible);
    start..start + visible
  }

  /// Cell under offset `(dx, dy)` of a viewport `width` x `height` drawn with
  /// [`visible_rows`](Self::visible_rows) and equal-width columns. `None` past
  /// the last item or outside the columns.
  pub fn cell_at(&self, dx: u16, dy: u16, width: u16, height: u16) -> Option<GridCell> {
    let rows = self.visible_rows(usize::from(height));
    let cell_width = usize::from(width) / self.columns;
    if cell_width == 0 {
      return None;
    }
    let row = rows.start + usize::from(dy);
    let col = usize::from(dx) / cell_width;
    if row >= rows.end || col >= self.columns {
      return None;
    }
    self.cell(row, col).map(|_| GridCell::new(row, col))
  }
}

#[cfg(test)]
mod tests {
  use gifpick_search::ResultItem;

  use super::{
    GridCell,
    GridSource,
    clamp_row,
    row_count,
  };

  fn items(n: usize) -> Vec<ResultItem> {
    (0..n)
      .map(|i| {
        ResultItem {
          id:          i.to_string(),
          title:       format!("gif {i}"),
          preview_url: format!("https://media/{i}.webp"),
        }
      })
      .collect()
  }

  #[test]
  fn chunks_into_fixed_width_rows() {
    let items = items(5);
    let grid = GridSource::new(&items, 2, 0);
    assert_eq!(grid.row_count(), 3);
    assert_eq!(grid.cell(2, 0).map(|item| item.id.as_str()), Some("4"));
    assert_eq!(grid.cell(2, 1), None);
    assert_eq!(grid.cell(0, 2), None);
    assert_eq!(grid.row(1).len(), 2);
    assert!(grid.row(7).is_empty());
  }

  #[test]
  fn scroll_target_is_clamped() {
    let items = items(6);
    assert_eq!(GridSource::new(&items, 2, 99).scroll_to_row(), 2);
    assert_eq!(GridSource::new(&[], 2, 5).scroll_to_row(), 0);
    assert_eq!(clamp_row(4, 0), 0);
    assert_eq!(row_count(0, 2), 0);
  }

  #[test]
  fn visible_rows_stay_full_near_the_end() {
    let items = items(20);
    let grid = GridSource::new(&items, 2, 8);
    assert_eq!(grid.visible_rows(4), 6..10);
    assert_eq!(GridSource::new(&items, 2, 1).visible_rows(4), 1..5);
    assert_eq!(GridSource::new(&items, 2, 0).visible_rows(50), 0..10);
  }

  #[test]
  fn hit_testing_follows_the_scrolled_viewport() {
    let items = items(7);
    let grid = GridSource::new(&items, 2, 1);
    assert_eq!(grid.cell_at(0, 0, 20, 2), Some(GridCell::new(1, 0)));
    assert_eq!(grid.cell_at(15, 1, 20, 2), Some(GridCell::new(2, 1)));
    assert_eq!(grid.cell_at(3, 2, 20, 2), None);

    // The short last row has nothing in its second column.
    let grid = GridSource::new(&items, 2, 3);
    assert_eq!(grid.cell_at(12, 1, 20, 2), None);
    assert_eq!(grid.cell_at(0, 0, 1, 2), None);
  }
}
