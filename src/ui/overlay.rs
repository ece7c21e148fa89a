use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::bar::{BarRowView, BarView, Focus};

use super::chrome::OverlayChrome;
use super::layout::bar_rect;

const MARKER_WIDTH: usize = 3;

/// Rows the bar needs for `view`, borders included.
pub fn bar_height(view: &BarView) -> u16 {
    let results = if view.rows.is_empty() {
        0
    } else {
        let footer = usize::from(hidden_rows(view) > 0);
        1 + view.rows.len() + footer
    };
    u16::try_from(2 + 1 + results).unwrap_or(u16::MAX)
}

fn hidden_rows(view: &BarView) -> usize {
    view.total_rows.saturating_sub(view.rows.len())
}

/// Draws the bar over `host`, or over the view's parent rect when it has one.
pub fn draw_quick_action_bar(
    frame: &mut Frame<'_>,
    host: Rect,
    view: &BarView,
    chrome: OverlayChrome,
    width: u16,
) {
    let parent = view.parent.map_or(host, |parent| parent.intersection(host));
    if parent.width == 0 || parent.height == 0 {
        return;
    }

    let area = bar_rect(parent, width, bar_height(view));
    let inner = chrome.draw(frame, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let search_line = build_search_line(view, inner.width as usize);
    if view.rows.is_empty() || inner.height < 3 {
        let row = Rect::new(inner.x, inner.y, inner.width, 1);
        frame.render_widget(Paragraph::new(search_line), row);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(search_line), chunks[0]);
    let dim = Style::default().fg(Color::DarkGray);
    frame.render_widget(
        Paragraph::new("─".repeat(inner.width as usize)).style(dim),
        chunks[1],
    );

    let width = inner.width as usize;
    let mut lines: Vec<Line<'static>> = view
        .rows
        .iter()
        .map(|row| build_result_line(row, view.focus, view.shortcut_label, width))
        .collect();
    let hidden = hidden_rows(view);
    if hidden > 0 {
        lines.push(Line::from(Span::styled(format!("   +{hidden} more"), dim)));
    }
    frame.render_widget(Paragraph::new(lines), chunks[2]);
}

fn build_search_line(view: &BarView, width: usize) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    let mut prefix_width = 1;
    if let Some(icon) = &view.icon {
        spans.push(Span::raw(format!("{icon} ")));
        prefix_width += icon.width() + 1;
    }

    let suffix_width = if view.spinner.is_some() { 2 } else { 0 };
    let text_width = width
        .saturating_sub(prefix_width + suffix_width)
        .max(1);
    let caret = view.focus == Focus::SearchField;

    if view.input.is_empty() {
        spans.extend(placeholder_spans(&view.placeholder, text_width, caret));
    } else {
        spans.extend(input_spans(&view.input, view.cursor, text_width, caret));
    }

    if let Some(frame) = view.spinner {
        spans.push(Span::styled(
            format!(" {frame}"),
            Style::default().fg(Color::Cyan),
        ));
    }
    Line::from(spans)
}

fn placeholder_spans(placeholder: &str, width: usize, caret: bool) -> Vec<Span<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut chars = placeholder.chars();
    let mut spans = Vec::new();
    match chars.next() {
        Some(first) if caret => {
            spans.push(Span::styled(first.to_string(), dim.reversed()));
        }
        Some(first) => spans.push(Span::styled(first.to_string(), dim)),
        None if caret => spans.push(Span::raw(" ").reversed()),
        None => {}
    }
    let rest: String = chars.take(width.saturating_sub(1)).collect();
    if !rest.is_empty() {
        spans.push(Span::styled(rest, dim));
    }
    spans
}

/// Visible window of the input with a software caret, so the terminal cursor
/// never has to be moved.
fn input_spans(input: &str, cursor: usize, width: usize, caret: bool) -> Vec<Span<'static>> {
    let chars: Vec<char> = input.chars().collect();
    let char_count = chars.len();
    let cursor = cursor.min(char_count);

    let start = if cursor >= width {
        cursor.saturating_sub(width.saturating_sub(1))
    } else {
        0
    };
    let end = (start + width).min(char_count);
    let mut visible: Vec<char> = chars[start..end].to_vec();
    if visible.len() < width {
        visible.extend(std::iter::repeat_n(' ', width - visible.len()));
    }

    let caret_idx = cursor.saturating_sub(start).min(width.saturating_sub(1));
    visible
        .into_iter()
        .enumerate()
        .map(|(idx, ch)| {
            if caret && idx == caret_idx {
                Span::styled(ch.to_string(), Style::default().reversed())
            } else {
                Span::raw(ch.to_string())
            }
        })
        .collect()
}

fn build_result_line(
    row: &BarRowView,
    focus: Focus,
    shortcut_label: Option<&'static str>,
    width: usize,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(row.line.spans.len() + 3);
    if row.selected {
        let marker = if focus == Focus::Results {
            Color::Cyan
        } else {
            Color::White
        };
        spans.push(Span::styled(" ┃ ", Style::default().fg(marker)));
    } else {
        spans.push(Span::raw(" ".repeat(MARKER_WIDTH)));
    }

    let label_width = row.line.width();
    for span in &row.line.spans {
        let mut span = span.clone();
        if !row.selectable {
            span = span.style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM));
        }
        spans.push(span);
    }

    let shortcut = match (row.shortcut, shortcut_label) {
        (Some(index), Some(label)) => format!("{label}{index} "),
        _ => String::new(),
    };
    let shortcut_width = shortcut.width();
    let padding = width.saturating_sub(MARKER_WIDTH + label_width + shortcut_width);
    spans.push(Span::raw(" ".repeat(padding)));
    if !shortcut.is_empty() {
        spans.push(Span::styled(shortcut, Style::default().fg(Color::DarkGray)));
    }

    let line = Line::from(spans);
    if row.selected {
        line.style(Style::default().bg(Color::Rgb(45, 45, 50)))
    } else {
        line
    }
}
