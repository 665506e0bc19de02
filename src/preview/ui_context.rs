//! The single UI-owning execution context
//!
//! Observable preview fields and icon handles may only be touched from one
//! thread. `UiContext` owns that thread: it runs a current-thread tokio
//! runtime with a `LocalSet`, and every closure submitted through
//! [`UiContext::run_on`] is spawned there. Jobs interleave at their await
//! points but never run in parallel, which serializes all field writes.

use super::error::{PreviewError, Result};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tokio::sync::{mpsc, oneshot};
use tokio::task::LocalSet;

type LocalFuture = Pin<Box<dyn Future<Output = ()>>>;
type Job = Box<dyn FnOnce() -> LocalFuture + Send>;

struct Inner {
    sender: mpsc::UnboundedSender<Job>,
    thread_id: ThreadId,
}

/// Handle to the UI-owning thread
///
/// Cloning is cheap. The thread stops once every handle has been dropped.
#[derive(Clone)]
pub struct UiContext {
    inner: Arc<Inner>,
}

impl UiContext {
    /// Start a new UI thread
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the thread or its runtime cannot be created.
    pub fn spawn(name: &str) -> Result<Self> {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let local = LocalSet::new();
                local.block_on(&runtime, async move {
                    while let Some(job) = receiver.recv().await {
                        tokio::task::spawn_local(job());
                    }
                });
                tracing::debug!("UI context stopped");
            })?;

        Ok(Self {
            inner: Arc::new(Inner {
                sender,
                thread_id: handle.thread().id(),
            }),
        })
    }

    /// Whether the caller is running on the UI thread
    #[must_use]
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.inner.thread_id
    }

    /// Run a closure on the UI thread and await its result
    ///
    /// The closure is called on the UI thread, so the future it returns does
    /// not need to be `Send`.
    ///
    /// # Errors
    ///
    /// Returns `UiContextClosed` if the UI thread has stopped, or stops
    /// before the job completes.
    pub async fn run_on<F, Fut, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + 'static,
        T: Send + 'static,
    {
        let (reply, result) = oneshot::channel();
        let job: Job = Box::new(move || -> LocalFuture {
            Box::pin(async move {
                let _ = reply.send(f().await);
            })
        });

        self.inner
            .sender
            .send(job)
            .map_err(|_| PreviewError::UiContextClosed)?;

        result.await.map_err(|_| PreviewError::UiContextClosed)
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("thread_id", &self.inner.thread_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_run_on_executes_on_ui_thread() {
        let ui = UiContext::spawn("test-ui").unwrap();
        assert!(!ui.is_current());

        let probe = ui.clone();
        let on_ui = ui.run_on(move || async move { probe.is_current() }).await.unwrap();
        assert!(on_ui);
    }

    #[tokio::test]
    async fn test_run_on_accepts_non_send_futures() {
        let ui = UiContext::spawn("test-ui").unwrap();

        let value = ui
            .run_on(|| async {
                let counter = Rc::new(Cell::new(1));
                tokio::task::yield_now().await;
                counter.set(counter.get() + 41);
                counter.get()
            })
            .await
            .unwrap();

        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_jobs_share_one_thread() {
        let ui = UiContext::spawn("test-ui").unwrap();

        let first = ui.run_on(|| async { thread::current().id() }).await.unwrap();
        let second = ui.run_on(|| async { thread::current().id() }).await.unwrap();

        assert_eq!(first, second);
        assert_ne!(first, thread::current().id());
    }
}
