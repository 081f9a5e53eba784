//! Shared bounded worker pool.

use std::future::Future;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use tokio::sync::Semaphore;

/// A fixed number of permits shared by every batch fan-out of one engine.
///
/// Each unit of work holds one permit while it runs, so the total number of
/// in-flight calls across concurrent batches never exceeds [`WorkerPool::size`].
/// A single call can further restrict itself with a ceiling.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    /// Create a pool with `size` permits. A size of zero is raised to one.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    /// Total number of permits.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Permits not currently held.
    #[must_use]
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Run `f` over every item with at most `min(ceiling, size)` calls in flight
    /// for this invocation, each holding a pool permit. Output order is
    /// completion order.
    pub async fn run<I, T, F, Fut>(&self, items: I, ceiling: usize, f: F) -> Vec<T>
    where
        I: IntoIterator,
        F: Fn(I::Item) -> Fut,
        Fut: Future<Output = T>,
    {
        let width = ceiling.clamp(1, self.size);
        let permits = &self.permits;
        stream::iter(items)
            .map(|item| {
                let fut = f(item);
                async move {
                    // The semaphore is never closed, so acquisition cannot fail.
                    let _permit = permits.acquire().await;
                    fut.await
                }
            })
            .buffer_unordered(width)
            .collect()
            .await
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(5)
    }
}
