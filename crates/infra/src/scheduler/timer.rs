use std::{future::Future, time::Duration};
use tokio::task::JoinHandle;

/// A one-shot wakeup running `task` after `delay` on the current runtime.
///
/// Dropping a `Timer` detaches it, only `cancel` stops it.
#[derive(Debug)]
pub(super) struct Timer {
    handle: JoinHandle<()>,
}

impl Timer {
    pub fn start<F>(delay: Duration, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        Self { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}
