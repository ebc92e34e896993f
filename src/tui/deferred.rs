// Deferred task queue
//
// Work scheduled from an input handler runs on a later turn of the event
// loop, never inside the handler that scheduled it. Selecting a row can then
// replace the rows being iterated without the handler observing it.

use tokio::sync::mpsc;
use url::Url;

/// Work to run after the current loop turn
#[derive(Debug, Clone, PartialEq)]
pub enum Deferred {
    /// Route a resolved URI through the handler registry
    Dispatch(Url),
    /// Route raw input (e.g. `navigation:up`) through its handler's parser
    DispatchText(String),
}

/// Cloneable handle used to schedule work
#[derive(Clone)]
pub struct Scheduler {
    tx: mpsc::UnboundedSender<Deferred>,
}

impl Scheduler {
    pub fn schedule(&self, task: Deferred) {
        tracing::debug!("Deferred {:?}", task);
        // Receiver lives as long as the event loop
        let _ = self.tx.send(task);
    }
}

/// Receiving end, drained by the event loop
pub struct TaskQueue {
    rx: mpsc::UnboundedReceiver<Deferred>,
}

impl TaskQueue {
    pub fn new() -> (Scheduler, TaskQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Scheduler { tx }, TaskQueue { rx })
    }

    /// Wait for the next task
    pub async fn next(&mut self) -> Option<Deferred> {
        self.rx.recv().await
    }

    /// Next task if one is already queued
    pub fn try_next(&mut self) -> Option<Deferred> {
        self.rx.try_recv().ok()
    }
}
