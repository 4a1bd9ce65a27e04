//! Bounded, fail-fast concurrent execution.
//!
//! Tasks run on the current task (nothing is spawned), so they may borrow
//! from the caller. A semaphore caps how many are in flight. Each task
//! reports its slot index with its value, and the collector writes values
//! into pre-allocated slots, so results come back in input order. The first
//! error drops every outstanding future.

use std::future::Future;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::config::DEFAULT_MAX_CONCURRENCY;

/// Executor for running tasks with controlled parallelism.
#[derive(Debug)]
pub struct BoundedExecutor {
    max_concurrency: usize,
    semaphore: Semaphore,
}

impl Default for BoundedExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENCY)
    }
}

impl BoundedExecutor {
    /// Create a new executor running at most `max_concurrency` tasks at once.
    pub fn new(max_concurrency: usize) -> Self {
        let max_concurrency = max_concurrency.max(1);
        Self {
            max_concurrency,
            semaphore: Semaphore::new(max_concurrency),
        }
    }

    /// Maximum number of tasks in flight.
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Run every task and return their values in input order.
    ///
    /// A task is only started once it holds a permit. On the first error the
    /// remaining futures are dropped and that error is returned.
    pub async fn try_execute_all<T, E, F, Fut>(
        &self,
        tasks: impl IntoIterator<Item = F>,
    ) -> Result<Vec<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let start = Instant::now();
        let tasks: Vec<F> = tasks.into_iter().collect();
        let total_tasks = tasks.len();

        let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(total_tasks).collect();
        let mut futures = FuturesUnordered::new();

        for (task_id, task) in tasks.into_iter().enumerate() {
            let semaphore = &self.semaphore;
            futures.push(async move {
                // The semaphore is owned by the executor and never closed.
                let _permit = semaphore.acquire().await.ok();
                (task_id, task().await)
            });
        }

        while let Some((task_id, result)) = futures.next().await {
            match result {
                Ok(value) => slots[task_id] = Some(value),
                Err(e) => {
                    // Cancel remaining futures by dropping them
                    drop(futures);
                    debug!(
                        task_id,
                        total_tasks,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Concurrent pass aborted"
                    );
                    return Err(e);
                }
            }
        }

        debug!(
            total_tasks,
            max_concurrency = self.max_concurrency,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Concurrent pass completed"
        );

        Ok(slots.into_iter().flatten().collect())
    }
}
