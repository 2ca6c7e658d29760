//! Rendering of one photo pane per source.

use photoroll_core::{FetchState, PhotoSink};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn draw_mars<S: PhotoSink>(f: &mut Frame, area: Rect, app: &App<S>) {
  let lines = match app.mars.state() {
    FetchState::Loading => loading_lines(),
    FetchState::Error => error_lines(),
    FetchState::Success { summary, .. } => {
      let mut lines = vec![Line::from(summary), Line::default()];
      if let Some(photo) = &app.mars_photo {
        lines.push(field("id", &photo.id));
        lines.push(field("image", &photo.img_src));
      }
      lines
    }
  };
  draw_pane(f, area, "Mars photos", lines);
}

pub fn draw_picsum<S: PhotoSink>(f: &mut Frame, area: Rect, app: &App<S>) {
  let lines = match app.picsum.state() {
    FetchState::Loading => loading_lines(),
    FetchState::Error => error_lines(),
    FetchState::Success { summary, .. } => {
      let mut lines = vec![Line::from(summary), Line::default()];
      if let Some(photo) = &app.picsum_photo {
        lines.push(field("id", &photo.id));
        lines.push(field("author", &photo.author));
        lines.push(field("size", &format!("{}×{}", photo.width, photo.height)));
        lines.push(field("page", &photo.url));
        lines.push(field("image", &photo.download_url));
      }
      lines
    }
  };
  draw_pane(f, area, "Picsum photos", lines);
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn loading_lines() -> Vec<Line<'static>> {
  vec![Line::from(Span::styled(
    "Loading…",
    Style::default().fg(Color::Yellow),
  ))]
}

fn error_lines() -> Vec<Line<'static>> {
  vec![Line::from(Span::styled(
    "Failed to load. Press [r] to retry.",
    Style::default().fg(Color::Red),
  ))]
}

fn field(name: &str, value: &str) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("{name:>7}: "),
      Style::default().fg(Color::Gray),
    ),
    Span::raw(value.to_string()),
  ])
}

fn draw_pane(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'_>>) {
  let block = Block::default()
    .borders(Borders::ALL)
    .title(format!(" {title} "));
  let paragraph = Paragraph::new(lines)
    .block(block)
    .wrap(Wrap { trim: true });
  f.render_widget(paragraph, area);
}
