use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::text::Line;

use crate::bar::{
    ActivateHandler, BarSession, ContentSource, DismissHandler, PresentOptions, QuickActionBar,
    QuickActionBarWindow, SearchTask,
};

pub(super) type Id = &'static str;

pub(super) const DEBOUNCE: Duration = Duration::from_millis(50);

/// Holds every task it receives so tests decide when and how they complete.
#[derive(Default)]
pub(super) struct HeldSource {
    tasks: Mutex<Vec<SearchTask<Id>>>,
    selected: Mutex<Vec<Id>>,
}

impl HeldSource {
    pub(super) fn tasks(&self) -> Vec<SearchTask<Id>> {
        self.tasks.lock().expect("tasks lock").clone()
    }

    pub(super) fn terms(&self) -> Vec<String> {
        self.tasks()
            .iter()
            .map(|task| task.search_term().to_string())
            .collect()
    }

    pub(super) fn last_task(&self) -> SearchTask<Id> {
        self.tasks().pop().expect("a search task should have been issued")
    }

    pub(super) fn selected(&self) -> Vec<Id> {
        self.selected.lock().expect("selected lock").clone()
    }
}

impl ContentSource<Id> for HeldSource {
    fn items_for_search_term(&self, _bar: &BarSession, task: SearchTask<Id>) {
        self.tasks.lock().expect("tasks lock").push(task);
    }

    fn row_for_identifier(&self, _bar: &BarSession, identifier: &Id, _term: &str) -> Line<'static> {
        Line::from(*identifier)
    }

    fn did_select_identifier(&self, _bar: &BarSession, identifier: &Id) {
        self.selected.lock().expect("selected lock").push(*identifier);
    }

    fn can_select_identifier(&self, _bar: &BarSession, identifier: &Id) -> bool {
        !identifier.starts_with('-')
    }
}

pub(super) struct Harness {
    pub(super) source: Arc<HeldSource>,
    pub(super) window: QuickActionBarWindow<Id>,
    pub(super) activated: Rc<RefCell<Vec<Id>>>,
    pub(super) dismissed: Rc<Cell<Option<bool>>>,
    pub(super) start: Instant,
}

impl Harness {
    pub(super) fn present(initial: Option<&str>, show_keyboard_shortcuts: bool) -> Self {
        let source = Arc::new(HeldSource::default());
        let mut bar = QuickActionBar::<Id>::new(source.clone());
        let activated = Rc::new(RefCell::new(Vec::new()));
        let dismissed = Rc::new(Cell::new(None));
        let start = Instant::now();

        let on_activate: ActivateHandler<Id> = {
            let activated = Rc::clone(&activated);
            Box::new(move |id: &Id| activated.borrow_mut().push(*id))
        };
        let on_dismiss: DismissHandler = {
            let dismissed = Rc::clone(&dismissed);
            Box::new(move |did_activate: bool| dismissed.set(Some(did_activate)))
        };
        let window = bar.present_at(
            PresentOptions {
                initial_search_text: initial.map(str::to_string),
                show_keyboard_shortcuts,
                debounce_interval: DEBOUNCE,
                on_activate: Some(on_activate),
                on_dismiss: Some(on_dismiss),
                ..PresentOptions::default()
            },
            start,
        );

        Self {
            source,
            window,
            activated,
            dismissed,
            start,
        }
    }

    pub(super) fn at(&self, millis: u64) -> Instant {
        self.start + Duration::from_millis(millis)
    }

    /// Completes the most recent task with `ids` and drains the main queue.
    pub(super) fn complete_last(&mut self, ids: &[Id]) {
        self.source.last_task().complete(Some(ids.to_vec()));
        self.window.run_pending_main_jobs();
    }

    pub(super) fn type_text(&mut self, text: &str, at_millis: u64) {
        for ch in text.chars() {
            let now = self.at(at_millis);
            self.window.handle_key(key(KeyCode::Char(ch)), now);
        }
    }

    pub(super) fn press(&mut self, code: KeyCode) -> bool {
        let now = self.at(0);
        self.window.handle_key(key(code), now)
    }

    pub(super) fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let now = self.at(0);
        self.window.handle_key(KeyEvent::new(code, modifiers), now)
    }
}

pub(super) fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
