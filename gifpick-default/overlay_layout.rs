#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayRect {
  pub x:      u16,
  pub y:      u16,
  pub width:  u16,
  pub height: u16,
}

impl OverlayRect {
  pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  pub const fn right(self) -> u16 {
    self.x.saturating_add(self.width)
  }

  pub const fn bottom(self) -> u16 {
    self.y.saturating_add(self.height)
  }

  pub const fn contains(self, col: u16, row: u16) -> bool {
    col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
  }
}

/// Place a panel of the given size next to `anchor`, preferring above the
/// anchor with left edges aligned (top-start).
///
/// Flips below the anchor when the space above cannot hold the panel but the
/// space below can. When neither side fits, the roomier side is used and the
/// panel shrinks to it. The result always lies inside `area`.
pub fn anchored_panel_rect(
  area: OverlayRect,
  anchor: OverlayRect,
  panel_width: u16,
  panel_height: u16,
) -> OverlayRect {
  let width = panel_width.min(area.width).max(1);
  let desired_height = panel_height.min(area.height).max(1);
  if area.width == 0 || area.height == 0 {
    return OverlayRect::new(area.x, area.y, width, desired_height);
  }

  let max_x = area.x + area.width.saturating_sub(width);
  let x = anchor.x.clamp(area.x, max_x);

  let anchor_top = anchor.y.clamp(area.y, area.bottom());
  let anchor_bottom = anchor.bottom().clamp(anchor_top, area.bottom());
  let above_space = anchor_top.saturating_sub(area.y);
  let below_space = area.bottom().saturating_sub(anchor_bottom);

  let place_above = if above_space >= desired_height {
    true
  } else if below_space >= desired_height {
    false
  } else {
    above_space >= below_space
  };

  let (height, y) = if place_above {
    let height = desired_height.min(above_space.max(1));
    let y = anchor_top.saturating_sub(height).max(area.y);
    (height, y)
  } else {
    let height = desired_height.min(below_space.max(1));
    let y = anchor_bottom.min(area.bottom().saturating_sub(height));
    (height, y)
  };

  OverlayRect::new(x, y, width, height)
}
