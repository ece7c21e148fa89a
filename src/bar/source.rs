use std::fmt::Debug;
use std::hash::Hash;

use ratatui::text::Line;

use super::task::SearchTask;

/// Opaque token naming one item of a content source.
pub trait Identifier: Clone + Eq + Hash + Debug + Send + 'static {}

impl<T> Identifier for T where T: Clone + Eq + Hash + Debug + Send + 'static {}

/// The presenting bar, as seen by its content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarSession {
    pub id: u64,
}

/// Host-supplied producer of matches. Ranking is entirely up to the source.
pub trait ContentSource<I: Identifier>: Send + Sync {
    /// Must eventually call [`SearchTask::complete`], from any thread. The
    /// task may be canceled at any point before that.
    fn items_for_search_term(&self, bar: &BarSession, task: SearchTask<I>);

    fn row_for_identifier(&self, bar: &BarSession, identifier: &I, search_term: &str)
    -> Line<'static>;

    fn did_select_identifier(&self, bar: &BarSession, identifier: &I);

    fn can_select_identifier(&self, _bar: &BarSession, _identifier: &I) -> bool {
        true
    }
}
