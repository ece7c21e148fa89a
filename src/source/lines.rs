use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tokio::runtime::{Builder, Handle, Runtime};

use crate::bar::{BarSession, ContentSource, SearchTask};
use crate::error::{AppError, AppResult};

use super::matcher::rank_lines;

/// A line made only of dashes (three or more) renders as a divider.
pub fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|ch| ch == '-')
}

/// Content source over a fixed list of lines. Identifiers are line indices.
pub struct LineSource {
    items: Arc<Vec<String>>,
    latency: Duration,
    runtime: SourceRuntime,
}

struct SourceRuntime {
    _owned: Option<Runtime>,
    handle: Handle,
}

impl SourceRuntime {
    fn new() -> AppResult<Self> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self {
                _owned: None,
                handle,
            });
        }

        let runtime = Builder::new_multi_thread()
            .enable_all()
            .thread_name("qab-source")
            .build()
            .map_err(|source| {
                AppError::io_with_context(source, "failed to start content source runtime")
            })?;
        let handle = runtime.handle().clone();
        Ok(Self {
            _owned: Some(runtime),
            handle,
        })
    }
}

impl LineSource {
    pub fn new(items: Vec<String>) -> AppResult<Self> {
        Ok(Self {
            items: Arc::new(items),
            latency: Duration::ZERO,
            runtime: SourceRuntime::new()?,
        })
    }

    /// Delays every search, to simulate a slow backend.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }
}

impl ContentSource<usize> for LineSource {
    fn items_for_search_term(&self, bar: &BarSession, task: SearchTask<usize>) {
        let items = Arc::clone(&self.items);
        let latency = self.latency;
        let session = bar.id;
        self.runtime.handle.spawn_blocking(move || {
            if !latency.is_zero() {
                thread::sleep(latency);
            }
            if task.is_canceled() {
                tracing::trace!(session, task_id = task.id(), "skipping canceled search");
                return;
            }
            let matches = rank_lines(task.search_term(), &items);
            tracing::trace!(session, task_id = task.id(), count = matches.len(), "search matched");
            task.complete(Some(matches));
        });
    }

    fn row_for_identifier(
        &self,
        _bar: &BarSession,
        identifier: &usize,
        search_term: &str,
    ) -> Line<'static> {
        let Some(text) = self.line(*identifier) else {
            return Line::default();
        };
        if is_separator(text) {
            return Line::from(Span::styled(
                "─".repeat(24),
                Style::default().fg(Color::DarkGray),
            ));
        }
        highlighted_line(text, search_term.trim())
    }

    fn did_select_identifier(&self, bar: &BarSession, identifier: &usize) {
        tracing::info!(
            session = bar.id,
            line = *identifier,
            text = self.line(*identifier).unwrap_or_default(),
            "line selected"
        );
    }

    fn can_select_identifier(&self, _bar: &BarSession, identifier: &usize) -> bool {
        self.line(*identifier).is_some_and(|text| !is_separator(text))
    }
}

fn highlighted_line(text: &str, term: &str) -> Line<'static> {
    if term.is_empty() || !term.is_ascii() {
        return Line::from(text.to_string());
    }
    let haystack = text.to_ascii_lowercase();
    let Some(start) = haystack.find(&term.to_ascii_lowercase()) else {
        return Line::from(text.to_string());
    };
    let end = start + term.len();
    let matched = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::raw(text[..start].to_string()),
        Span::styled(text[start..end].to_string(), matched),
        Span::raw(text[end..].to_string()),
    ])
}
