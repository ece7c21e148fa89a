mod activity;
mod api;
mod debounce;
mod executor;
mod keys;
mod results;
mod source;
mod task;
mod window;

#[cfg(test)]
mod tests;

pub use activity::{ActivityIndicator, SPINNER_FRAME_INTERVAL};
pub use api::{DEFAULT_ACTIVITY_DELAY, QuickActionBar};
pub use debounce::Debouncer;
pub use executor::{MainHandle, MainJob, MainQueue};
pub use keys::{BarCommand, KeyBindings, KeymapPreset, ShortcutModifier};
pub use results::{MAX_SHORTCUT_ROWS, ResultsView};
pub use source::{BarSession, ContentSource, Identifier};
pub use task::{Completion, SearchTask};
pub use window::{
    ActivateHandler, BarRowView, BarView, DEFAULT_DEBOUNCE_INTERVAL, DEFAULT_PLACEHOLDER,
    DismissHandler, Focus, PresentOptions, QuickActionBarWindow,
};
