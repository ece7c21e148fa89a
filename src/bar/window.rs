use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::Line;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use super::activity::ActivityIndicator;
use super::debounce::Debouncer;
use super::executor::{MainJob, MainQueue};
use super::keys::{BarCommand, KeyBindings};
use super::results::ResultsView;
use super::source::{BarSession, ContentSource, Identifier};
use super::task::SearchTask;

pub const DEFAULT_DEBOUNCE_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_PLACEHOLDER: &str = "Search";

pub type ActivateHandler<I> = Box<dyn FnMut(&I)>;
pub type DismissHandler = Box<dyn FnOnce(bool)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    SearchField,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebouncedAction {
    SearchTermDidChange,
}

pub struct PresentOptions<I> {
    pub parent: Option<Rect>,
    pub placeholder: String,
    pub icon: Option<String>,
    pub initial_search_text: Option<String>,
    pub show_keyboard_shortcuts: bool,
    pub debounce_interval: Duration,
    pub on_activate: Option<ActivateHandler<I>>,
    pub on_dismiss: Option<DismissHandler>,
}

impl<I> Default for PresentOptions<I> {
    fn default() -> Self {
        Self {
            parent: None,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            icon: None,
            initial_search_text: None,
            show_keyboard_shortcuts: false,
            debounce_interval: DEFAULT_DEBOUNCE_INTERVAL,
            on_activate: None,
            on_dismiss: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRowView {
    pub line: Line<'static>,
    pub selected: bool,
    pub selectable: bool,
    pub shortcut: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub parent: Option<Rect>,
    pub placeholder: String,
    pub icon: Option<String>,
    pub input: String,
    pub cursor: usize,
    pub focus: Focus,
    pub spinner: Option<char>,
    pub rows: Vec<BarRowView>,
    pub total_rows: usize,
    pub shortcut_label: Option<&'static str>,
}

/// One presentation of the quick action bar.
///
/// Owns the edit field, the result list and the search pipeline. Everything
/// here runs on the UI thread; content sources reach back in only through
/// jobs posted to the window's main queue.
pub struct QuickActionBarWindow<I: Identifier> {
    session: BarSession,
    source: Option<Arc<dyn ContentSource<I>>>,
    key_bindings: KeyBindings,
    parent: Option<Rect>,
    placeholder: String,
    icon: Option<String>,
    show_keyboard_shortcuts: bool,
    on_activate: Option<ActivateHandler<I>>,
    on_dismiss: Option<DismissHandler>,
    input: Input,
    current_search_text: String,
    user_did_activate_item: bool,
    current_search_task: Option<SearchTask<I>>,
    next_task_id: u64,
    results: ResultsView<I>,
    focus: Focus,
    debouncer: Debouncer<DebouncedAction>,
    activity: ActivityIndicator,
    main: MainQueue<QuickActionBarWindow<I>>,
    presented: bool,
}

impl<I: Identifier> QuickActionBarWindow<I> {
    pub(crate) fn new(
        session: BarSession,
        source: Option<Arc<dyn ContentSource<I>>>,
        key_bindings: KeyBindings,
        activity_delay: Duration,
        options: PresentOptions<I>,
    ) -> Self {
        Self {
            session,
            source,
            key_bindings,
            parent: options.parent,
            placeholder: options.placeholder,
            icon: options.icon,
            show_keyboard_shortcuts: options.show_keyboard_shortcuts,
            on_activate: options.on_activate,
            on_dismiss: options.on_dismiss,
            input: Input::default(),
            current_search_text: String::new(),
            user_did_activate_item: false,
            current_search_task: None,
            next_task_id: 1,
            results: ResultsView::default(),
            focus: Focus::SearchField,
            debouncer: Debouncer::new(options.debounce_interval),
            activity: ActivityIndicator::new(activity_delay),
            main: MainQueue::new(),
            presented: false,
        }
    }

    /// Focuses the edit field, applies the initial text and runs the first
    /// search right away, without waiting for the debounce interval.
    pub(crate) fn present(&mut self, initial_search_text: Option<String>, now: Instant) {
        self.presented = true;
        self.focus = Focus::SearchField;
        if let Some(text) = initial_search_text {
            self.set_current_search_text(text);
        }
        tracing::debug!(
            session = self.session.id,
            parent = ?self.parent,
            "quick action bar presented"
        );
        self.search_term_did_change(now);
    }

    pub fn dismiss(&mut self) {
        if !self.presented {
            return;
        }
        self.presented = false;
        self.debouncer.cancel();
        self.cancel_current_search_task();
        self.activity.stop();
        tracing::debug!(
            session = self.session.id,
            activated = self.user_did_activate_item,
            "quick action bar dismissed"
        );
        if let Some(on_dismiss) = self.on_dismiss.take() {
            on_dismiss(self.user_did_activate_item);
        }
    }

    /// Escape: close without activating anything.
    pub fn cancel_operation(&mut self) {
        self.dismiss();
    }

    /// The bar lost key focus.
    pub fn resign_active(&mut self) {
        self.dismiss();
    }

    /// Routes a key press. Returns true when the bar handled it.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if !self.presented {
            return false;
        }

        let command = self.key_bindings.command_for_key(key);
        if command == Some(BarCommand::Cancel) {
            self.cancel_operation();
            return true;
        }

        match self.focus {
            Focus::SearchField => {
                if let Some(command) = command {
                    let handled = self.do_command_by(command);
                    if handled || self.is_shortcut(command) {
                        return handled;
                    }
                }
                self.edit_field_key(key, now)
            }
            Focus::Results => self.results_key(command, key, now),
        }
    }

    /// Commands intercepted while the edit field has focus.
    fn do_command_by(&mut self, command: BarCommand) -> bool {
        match command {
            BarCommand::MoveDown => self.results.select_next_selectable_row(),
            BarCommand::MoveUp => self.results.select_previous_selectable_row(),
            BarCommand::InsertNewline => {
                if self.results.selected_row().is_none() {
                    return false;
                }
                self.row_action();
                true
            }
            BarCommand::Shortcut(digit) if self.show_keyboard_shortcuts => {
                self.perform_shortcut_action(usize::from(digit))
            }
            BarCommand::FocusNext => {
                if self.results.is_empty() {
                    return false;
                }
                self.focus = Focus::Results;
                true
            }
            BarCommand::Shortcut(_) | BarCommand::MoveLeft | BarCommand::Cancel => false,
        }
    }

    fn is_shortcut(&self, command: BarCommand) -> bool {
        self.show_keyboard_shortcuts && matches!(command, BarCommand::Shortcut(_))
    }

    fn results_key(&mut self, command: Option<BarCommand>, key: KeyEvent, now: Instant) -> bool {
        match command {
            Some(BarCommand::MoveDown) => self.results.select_next_selectable_row(),
            Some(BarCommand::MoveUp) => self.results.select_previous_selectable_row(),
            Some(BarCommand::InsertNewline) => self.row_action(),
            Some(BarCommand::MoveLeft) | Some(BarCommand::FocusNext) => {
                self.pressed_left_arrow_in_results_view();
                true
            }
            Some(BarCommand::Shortcut(digit)) if self.show_keyboard_shortcuts => {
                self.perform_shortcut_action(usize::from(digit))
            }
            _ => {
                self.focus = Focus::SearchField;
                self.edit_field_key(key, now)
            }
        }
    }

    pub fn pressed_left_arrow_in_results_view(&mut self) {
        self.focus = Focus::SearchField;
    }

    fn edit_field_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let Some(change) = self.input.handle_event(&Event::Key(key)) else {
            return false;
        };
        if change.value {
            self.text_did_change(now);
        }
        true
    }

    pub fn text_did_change(&mut self, now: Instant) {
        self.debouncer
            .schedule(DebouncedAction::SearchTermDidChange, now);
    }

    /// Fires the debounced search once its interval has elapsed.
    pub fn poll_debounce(&mut self, now: Instant) -> bool {
        match self.debouncer.take_due(now) {
            Some(DebouncedAction::SearchTermDidChange) => {
                self.search_term_did_change(now);
                true
            }
            None => false,
        }
    }

    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn search_term_did_change(&mut self, now: Instant) {
        debug_assert!(
            self.main.is_main_thread(),
            "search dispatch must run on the UI thread"
        );
        self.cancel_current_search_task();

        let Some(source) = self.source.clone() else {
            return;
        };

        let current_search = self.input.value().to_string();
        self.current_search_text = current_search.clone();
        self.activity.start(now);

        let task_id = self.next_task_id;
        self.next_task_id = self.next_task_id.saturating_add(1);
        let main = self.main.handle();
        let term = current_search.clone();
        let task = SearchTask::new(task_id, current_search, move |identifiers: Option<Vec<I>>| {
            let delivered = main.dispatch(move |window: &mut QuickActionBarWindow<I>| {
                window.finish_search_task(task_id, term, identifiers.unwrap_or_default());
            });
            if !delivered {
                tracing::trace!(task_id, "bar closed before results arrived");
            }
        });

        tracing::debug!(
            session = self.session.id,
            task_id,
            term = task.search_term(),
            "dispatching search"
        );
        self.current_search_task = Some(task.clone());
        source.items_for_search_term(&self.session, task);
    }

    fn finish_search_task(&mut self, task_id: u64, search_term: String, identifiers: Vec<I>) {
        let current = self.current_search_task.as_ref().map(SearchTask::id);
        if current != Some(task_id) {
            tracing::debug!(task_id, ?current, "dropping results of superseded search");
            return;
        }
        self.cancel_current_search_task();
        self.update_results(search_term, identifiers);
    }

    pub fn update_results(&mut self, search_term: String, identifiers: Vec<I>) {
        debug_assert!(
            self.main.is_main_thread(),
            "results must be applied on the UI thread"
        );
        self.activity.stop();
        tracing::debug!(
            session = self.session.id,
            term = %search_term,
            count = identifiers.len(),
            "applying search results"
        );
        self.results.set_current_search_term(search_term);
        let session = self.session;
        let source = self.source.as_deref();
        self.results.set_identifiers(identifiers, |identifier| {
            source.is_none_or(|source| source.can_select_identifier(&session, identifier))
        });
        if self.results.is_empty() {
            self.focus = Focus::SearchField;
        }
    }

    pub fn cancel_current_search_task(&mut self) {
        debug_assert!(
            self.main.is_main_thread(),
            "search cancellation must run on the UI thread"
        );
        if let Some(task) = self.current_search_task.take() {
            task.cancel();
            tracing::trace!(task_id = task.id(), "search task canceled");
        }
    }

    pub fn row_action(&mut self) -> bool {
        let Some(identifier) = self.results.row_action() else {
            return false;
        };
        self.activate(identifier);
        true
    }

    pub fn perform_shortcut_action(&mut self, index: usize) -> bool {
        let Some(identifier) = self.results.perform_shortcut_action(index) else {
            return false;
        };
        self.activate(identifier);
        true
    }

    fn activate(&mut self, identifier: I) {
        if let Some(source) = &self.source {
            source.did_select_identifier(&self.session, &identifier);
        }
        if let Some(on_activate) = self.on_activate.as_mut() {
            on_activate(&identifier);
        }
        self.user_did_activate_item = true;
        tracing::info!(session = self.session.id, ?identifier, "item activated");
        self.dismiss();
    }

    /// Runs every job content sources have posted so far.
    pub fn run_pending_main_jobs(&mut self) -> bool {
        let mut ran = false;
        while let Some(job) = self.main.try_next() {
            job(self);
            ran = true;
        }
        ran
    }

    pub async fn next_main_job(&mut self) -> Option<MainJob<Self>> {
        self.main.next().await
    }

    pub fn run_main_job(&mut self, job: MainJob<Self>) {
        job(self);
    }

    pub fn view(&mut self, now: Instant, max_rows: usize) -> BarView {
        let range = self.results.visible_range(max_rows);
        let selected = self.results.selected_row();
        let term = self.results.current_search_term().to_string();
        let mut rows = Vec::with_capacity(range.len());
        for row in range {
            let Some(identifier) = self.results.identifiers().get(row) else {
                continue;
            };
            let line = match &self.source {
                Some(source) => source.row_for_identifier(&self.session, identifier, &term),
                None => Line::from(format!("{identifier:?}")),
            };
            rows.push(BarRowView {
                line,
                selected: selected == Some(row),
                selectable: self.results.is_selectable(row),
                shortcut: self
                    .show_keyboard_shortcuts
                    .then(|| self.results.shortcut_for_row(row))
                    .flatten(),
            });
        }

        BarView {
            parent: self.parent,
            placeholder: self.placeholder.clone(),
            icon: self.icon.clone(),
            input: self.input.value().to_string(),
            cursor: self.input.visual_cursor(),
            focus: self.focus,
            spinner: self.activity.frame(now),
            rows,
            total_rows: self.results.len(),
            shortcut_label: self
                .show_keyboard_shortcuts
                .then(|| self.key_bindings.shortcut_modifier.label()),
        }
    }

    fn set_current_search_text(&mut self, text: String) {
        self.input = Input::new(text.clone());
        self.current_search_text = text;
    }

    pub fn session(&self) -> BarSession {
        self.session
    }

    pub fn current_search_text(&self) -> &str {
        &self.current_search_text
    }

    pub fn edit_text(&self) -> &str {
        self.input.value()
    }

    pub fn user_did_activate_item(&self) -> bool {
        self.user_did_activate_item
    }

    pub fn is_presented(&self) -> bool {
        self.presented
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn results(&self) -> &ResultsView<I> {
        &self.results
    }

    pub fn current_search_task(&self) -> Option<&SearchTask<I>> {
        self.current_search_task.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.activity.is_running()
    }
}
