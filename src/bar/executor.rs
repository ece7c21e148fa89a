use std::thread::{self, ThreadId};

use tokio::sync::mpsc::{
    UnboundedReceiver, UnboundedSender, WeakUnboundedSender, error::TryRecvError,
    unbounded_channel,
};

/// Work that must run on the UI thread against its owner.
pub type MainJob<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Mailbox of UI-thread jobs owned by `T`.
///
/// The queue keeps the only strong sender; handed-out [`MainHandle`]s hold it
/// weakly, so once the owner is dropped every later dispatch is discarded.
pub struct MainQueue<T> {
    tx: UnboundedSender<MainJob<T>>,
    rx: UnboundedReceiver<MainJob<T>>,
    thread: ThreadId,
}

pub struct MainHandle<T> {
    tx: WeakUnboundedSender<MainJob<T>>,
}

impl<T> Clone for MainHandle<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> MainQueue<T> {
    pub fn new() -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            tx,
            rx,
            thread: thread::current().id(),
        }
    }

    pub fn handle(&self) -> MainHandle<T> {
        MainHandle {
            tx: self.tx.downgrade(),
        }
    }

    pub fn is_main_thread(&self) -> bool {
        thread::current().id() == self.thread
    }

    pub fn try_next(&mut self) -> Option<MainJob<T>> {
        match self.rx.try_recv() {
            Ok(job) => Some(job),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Waits for the next job. Never resolves to `None` while the queue is
    /// alive because it holds its own sender.
    pub async fn next(&mut self) -> Option<MainJob<T>> {
        self.rx.recv().await
    }
}

impl<T> Default for MainQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MainHandle<T> {
    /// Returns false when the owning queue no longer exists.
    pub fn dispatch<F>(&self, job: F) -> bool
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        let Some(tx) = self.tx.upgrade() else {
            return false;
        };
        tx.send(Box::new(job)).is_ok()
    }
}
