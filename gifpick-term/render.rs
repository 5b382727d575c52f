//! Rendering - draws the composer line, the sent list and the popover.

use eyre::Result;
use gifpick_default::{
  GifButton,
  GridCell,
  GridSource,
  OverlayRect,
  PanelBody,
};
use ratatui::{
  Frame,
  layout::{
    Alignment,
    Constraint,
    Layout,
    Rect,
  },
  style::{
    Color,
    Modifier,
    Style,
  },
  text::{
    Line,
    Span,
  },
  widgets::{
    Block,
    Clear,
    Paragraph,
  },
};

use crate::{
  app::App,
  terminal::Terminal,
};

const TRIGGER: &str = "[GIF]";
const PANEL_WIDTH: u16 = 60;
const PANEL_HEIGHT: u16 = 18;

pub fn render(app: &mut App, terminal: &mut Terminal) -> Result<()> {
  terminal.draw(|frame| draw(frame, app))
}

pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
  let area = frame.area();
  let [history, composer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

  draw_history(frame, app, history);
  draw_composer(frame, app, composer);

  let trigger = Rect::new(composer.x, composer.y, TRIGGER.len() as u16, 1).intersection(area);
  app.button.set_trigger_rect(to_overlay(trigger));
  if let Some(panel) = app
    .button
    .place_panel(to_overlay(area), PANEL_WIDTH, PANEL_HEIGHT)
  {
    let grid = draw_panel(frame, &app.button, to_rect(panel));
    app.button.set_grid_area(grid.map(to_overlay));
  }

  if app.show_help {
    draw_help(frame, &app.button, area);
  }
}

fn draw_history(frame: &mut Frame<'_>, app: &App, area: Rect) {
  let lines: Vec<Line> = app
    .sent()
    .iter()
    .map(|item| {
      Line::from(vec![
        Span::styled(display_title(&item.title, &item.id).to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(item.preview_url.clone(), Style::default().fg(Color::DarkGray)),
      ])
    })
    .collect();
  // Newest at the bottom, next to the composer.
  let skip = lines.len().saturating_sub(usize::from(area.height));
  frame.render_widget(Paragraph::new(lines[skip..].to_vec()), area);
}

fn draw_composer(frame: &mut Frame<'_>, app: &App, area: Rect) {
  let trigger_style = if app.button.is_open() {
    Style::default().add_modifier(Modifier::REVERSED)
  } else {
    Style::default().fg(Color::Cyan)
  };
  let hint = format!(
    " {}  ({}, F1 help, q quit)",
    app.button.label(),
    app.button.shortcut().label()
  );
  let line = Line::from(vec![
    Span::styled(TRIGGER, trigger_style),
    Span::styled(hint, Style::default().fg(Color::DarkGray)),
  ]);
  frame.render_widget(Paragraph::new(line), area);
}

/// Returns where the result grid went, if one was drawn.
fn draw_panel(frame: &mut Frame<'_>, button: &GifButton, rect: Rect) -> Option<Rect> {
  let picker = button.picker()?;
  frame.render_widget(Clear, rect);
  let block = Block::bordered().title(" GIPHY ");
  let inner = block.inner(rect);
  frame.render_widget(block, rect);
  if inner.height == 0 || inner.width == 0 {
    return None;
  }

  let [field, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);
  let i18n = button.localizer();
  let input = picker.input();
  let field_line = if input.is_empty() {
    Line::from(Span::styled(
      picker.placeholder(i18n).into_owned(),
      Style::default().fg(Color::DarkGray),
    ))
  } else {
    Line::from(input.text().to_string())
  };
  frame.render_widget(Paragraph::new(field_line), field);
  if picker.is_search_mode() {
    let caret = u16::try_from(input.cursor_graphemes()).unwrap_or(u16::MAX);
    frame.set_cursor_position((field.x.saturating_add(caret).min(field.right().saturating_sub(1)), field.y));
  }

  match picker.body(i18n) {
    PanelBody::Empty(message) => {
      frame.render_widget(
        Paragraph::new(message.into_owned()).alignment(Alignment::Center),
        body,
      );
      None
    },
    PanelBody::Grid(grid) => {
      draw_grid(frame, grid, body);
      Some(body)
    },
  }
}

/// Only the rows that fit are materialized.
fn draw_grid(frame: &mut Frame<'_>, grid: GridSource<'_>, area: Rect) {
  let columns = grid.column_count();
  let cell_width = usize::from(area.width) / columns;
  let lines: Vec<Line> = grid
    .visible_rows(usize::from(area.height))
    .map(|row| {
      let spans: Vec<Span> = (0..columns)
        .filter_map(|col| grid.cell(row, col).map(|item| (col, item)))
        .map(|(col, item)| {
          let style = if grid.focus() == Some(GridCell::new(row, col)) {
            Style::default().add_modifier(Modifier::REVERSED)
          } else {
            Style::default()
          };
          Span::styled(fit(display_title(&item.title, &item.id), cell_width), style)
        })
        .collect();
      Line::from(spans)
    })
    .collect();
  frame.render_widget(Paragraph::new(lines), area);
}

fn draw_help(frame: &mut Frame<'_>, button: &GifButton, area: Rect) {
  let lines = vec![
    Line::from(format!("{}  open / close", button.shortcut().label())),
    Line::from("Enter, Space  open from the composer"),
    Line::from("type          search"),
    Line::from("Down, Tab     from search to results"),
    Line::from("arrows        move, Enter or click sends"),
    Line::from("Esc           clear search, then close"),
    Line::from("F1            toggle this help"),
    Line::from("q, Ctrl+C     quit"),
  ];
  let width = 44.min(area.width);
  let height = (lines.len() as u16 + 2).min(area.height);
  let rect = Rect::new(
    area.x + (area.width - width) / 2,
    area.y + (area.height - height) / 2,
    width,
    height,
  );
  frame.render_widget(Clear, rect);
  frame.render_widget(Paragraph::new(lines).block(Block::bordered().title(" Keys ")), rect);
}

fn display_title<'a>(title: &'a str, id: &'a str) -> &'a str {
  if title.trim().is_empty() { id } else { title }
}

/// Truncate or pad `text` to exactly `width` columns, keeping a gap on the
/// right so neighbouring cells stay apart.
fn fit(text: &str, width: usize) -> String {
  if width == 0 {
    return String::new();
  }
  let mut out: String = text.chars().take(width - 1).collect();
  let used = out.chars().count();
  out.extend(std::iter::repeat_n(' ', width - used));
  out
}

fn to_overlay(rect: Rect) -> OverlayRect {
  OverlayRect::new(rect.x, rect.y, rect.width, rect.height)
}

fn to_rect(rect: OverlayRect) -> Rect {
  Rect::new(rect.x, rect.y, rect.width, rect.height)
}

#[cfg(test)]
mod tests {
  use gifpick_default::PointerEvent;
  use gifpick_loader::Config;
  use gifpick_search::ResultItem;
  use ratatui::{
    Terminal,
    backend::TestBackend,
  };
  use tokio::sync::mpsc;

  use super::{
    draw,
    fit,
  };
  use crate::app::App;

  fn app() -> App {
    let (requests, _) = mpsc::channel(1);
    let (_, responses) = mpsc::channel(1);
    App::new(&Config::default(), requests, responses)
  }

  fn screen(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    terminal
      .backend()
      .buffer()
      .content()
      .iter()
      .map(|cell| cell.symbol())
      .collect()
  }

  #[test]
  fn cells_are_fixed_width() {
    assert_eq!(fit("dancing cat", 6), "danci ");
    assert_eq!(fit("ok", 5), "ok   ");
    assert_eq!(fit("x", 0), "");
  }

  #[test]
  fn closed_popover_only_shows_the_composer() {
    let mut app = app();
    let screen = screen(&mut app);
    assert!(screen.contains("[GIF]"));
    assert!(!screen.contains("GIPHY"));
    assert!(app.button.panel_rect().is_none());
  }

  #[test]
  fn open_popover_shows_results_above_the_trigger() {
    let mut app = app();
    app.button.open();
    let request = app.button.take_search_request().unwrap();
    let items = vec![
      ResultItem {
        id:          "1".into(),
        title:       "waving hand".into(),
        preview_url: "https://media/1.webp".into(),
      },
      ResultItem {
        id:          "2".into(),
        title:       String::new(),
        preview_url: "https://media/2.webp".into(),
      },
    ];
    app.button.apply_results(request.seq, items);

    let screen = screen(&mut app);
    assert!(screen.contains("Search GIPHY"));
    assert!(screen.contains("waving hand"));
    let panel = app.button.panel_rect().unwrap();
    assert!(panel.bottom() <= app.button.trigger_rect().y);

    // The grid sits inside the border, under the search field.
    app.button.handle_pointer(PointerEvent::down(panel.x + 1, panel.y + 2));
    assert_eq!(app.sent().first().map(|item| item.id.as_str()), Some("1"));
  }

  #[test]
  fn empty_results_show_the_message() {
    let mut app = app();
    app.button.open();
    let request = app.button.take_search_request().unwrap();
    app.button.apply_results(request.seq, Vec::new());
    assert!(screen(&mut app).contains("No GIFs found"));
  }
}
