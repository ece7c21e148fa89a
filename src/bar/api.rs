use std::sync::Arc;
use std::time::{Duration, Instant};

use super::keys::KeyBindings;
use super::source::{BarSession, ContentSource, Identifier};
use super::window::{PresentOptions, QuickActionBarWindow};

pub const DEFAULT_ACTIVITY_DELAY: Duration = Duration::from_millis(120);

/// Host-facing entry point. Each call to [`QuickActionBar::present`] yields a
/// fresh window; drop it once [`QuickActionBarWindow::is_presented`] turns
/// false.
pub struct QuickActionBar<I: Identifier> {
    content_source: Option<Arc<dyn ContentSource<I>>>,
    key_bindings: KeyBindings,
    activity_delay: Duration,
    next_session_id: u64,
}

impl<I: Identifier> Default for QuickActionBar<I> {
    fn default() -> Self {
        Self {
            content_source: None,
            key_bindings: KeyBindings::default(),
            activity_delay: DEFAULT_ACTIVITY_DELAY,
            next_session_id: 1,
        }
    }
}

impl<I: Identifier> QuickActionBar<I> {
    pub fn new(content_source: Arc<dyn ContentSource<I>>) -> Self {
        Self {
            content_source: Some(content_source),
            ..Self::default()
        }
    }

    pub fn set_content_source(&mut self, content_source: Option<Arc<dyn ContentSource<I>>>) {
        self.content_source = content_source;
    }

    pub fn content_source(&self) -> Option<&Arc<dyn ContentSource<I>>> {
        self.content_source.as_ref()
    }

    pub fn with_key_bindings(mut self, key_bindings: KeyBindings) -> Self {
        self.key_bindings = key_bindings;
        self
    }

    pub fn with_activity_delay(mut self, delay: Duration) -> Self {
        self.activity_delay = delay;
        self
    }

    pub fn present(&mut self, options: PresentOptions<I>) -> QuickActionBarWindow<I> {
        self.present_at(options, Instant::now())
    }

    /// Same as [`QuickActionBar::present`] with an explicit clock reading.
    pub fn present_at(
        &mut self,
        mut options: PresentOptions<I>,
        now: Instant,
    ) -> QuickActionBarWindow<I> {
        let session = BarSession {
            id: self.next_session_id,
        };
        self.next_session_id = self.next_session_id.saturating_add(1);

        let initial_search_text = options.initial_search_text.take();
        let mut window = QuickActionBarWindow::new(
            session,
            self.content_source.clone(),
            self.key_bindings,
            self.activity_delay,
            options,
        );
        window.present(initial_search_text, now);
        window
    }
}
