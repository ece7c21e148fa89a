use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

pub type Completion<I> = Box<dyn FnOnce(Option<Vec<I>>) + Send>;

struct TaskRecord<I> {
    id: u64,
    search_term: String,
    canceled: AtomicBool,
    completion: Mutex<Option<Completion<I>>>,
}

/// One in-flight search handed to a content source.
///
/// Clones share the same record. The completion runs at most once, and never
/// after [`SearchTask::cancel`]. It may be invoked from any thread.
pub struct SearchTask<I> {
    record: Arc<TaskRecord<I>>,
}

impl<I> Clone for SearchTask<I> {
    fn clone(&self) -> Self {
        Self {
            record: Arc::clone(&self.record),
        }
    }
}

impl<I> fmt::Debug for SearchTask<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchTask")
            .field("id", &self.record.id)
            .field("search_term", &self.record.search_term)
            .field("canceled", &self.is_canceled())
            .finish()
    }
}

impl<I> SearchTask<I> {
    pub fn new<F>(id: u64, search_term: impl Into<String>, completion: F) -> Self
    where
        F: FnOnce(Option<Vec<I>>) + Send + 'static,
    {
        Self {
            record: Arc::new(TaskRecord {
                id,
                search_term: search_term.into(),
                canceled: AtomicBool::new(false),
                completion: Mutex::new(Some(Box::new(completion))),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.record.id
    }

    pub fn search_term(&self) -> &str {
        &self.record.search_term
    }

    pub fn is_canceled(&self) -> bool {
        self.record.canceled.load(Ordering::Acquire)
    }

    /// True once the completion has run or the task was canceled.
    pub fn is_finished(&self) -> bool {
        self.lock_completion().is_none()
    }

    /// Delivers the match set. `None` means "no results".
    pub fn complete(&self, identifiers: Option<Vec<I>>) {
        let completion = self.lock_completion().take();
        if let Some(completion) = completion {
            completion(identifiers);
        }
    }

    pub fn cancel(&self) {
        self.record.canceled.store(true, Ordering::Release);
        self.lock_completion().take();
    }

    fn lock_completion(&self) -> std::sync::MutexGuard<'_, Option<Completion<I>>> {
        self.record
            .completion
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use super::SearchTask;

    fn recording_task(term: &str) -> (SearchTask<u32>, Arc<Mutex<Vec<Option<Vec<u32>>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let task = SearchTask::new(1, term, move |ids| {
            sink.lock().expect("sink lock").push(ids);
        });
        (task, calls)
    }

    #[test]
    fn complete_invokes_completion_once() {
        let (task, calls) = recording_task("foo");
        assert_eq!(task.search_term(), "foo");
        assert!(!task.is_finished());

        task.complete(Some(vec![1, 2]));
        task.complete(Some(vec![3]));

        assert_eq!(*calls.lock().expect("calls lock"), vec![Some(vec![1, 2])]);
        assert!(task.is_finished());
        assert!(!task.is_canceled());
    }

    #[test]
    fn canceled_task_ignores_later_completion() {
        let (task, calls) = recording_task("foo");
        let source_copy = task.clone();

        task.cancel();
        source_copy.complete(Some(vec![9]));

        assert!(source_copy.is_canceled());
        assert!(calls.lock().expect("calls lock").is_empty());
    }

    #[test]
    fn completion_may_arrive_from_another_thread() {
        let (task, calls) = recording_task("bar");
        let remote = task.clone();
        thread::spawn(move || remote.complete(None))
            .join()
            .expect("worker should finish");

        assert_eq!(*calls.lock().expect("calls lock"), vec![None]);
    }
}
