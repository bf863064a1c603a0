//! Reentrant draw batching.
//!
//! Invariant: the counter never goes below zero, and the transition back to zero is reported
//! exactly once per outermost draw scope. The caller flushes the backend on that report.

use std::sync::atomic::{AtomicI32, Ordering};

#[derive(Debug, Default)]
pub struct DrawBatcher {
    count: AtomicI32,
}

impl DrawBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a draw scope. Returns the depth after entering.
    pub fn begin(&self) -> i32 {
        self.count.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Leave a draw scope. Returns `true` when this was the outermost scope.
    pub fn end(&self) -> bool {
        match self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count > 0).then(|| count - 1)
            }) {
            Ok(previous) => previous == 1,
            Err(_) => {
                tracing::warn!("draw scope ended without a matching begin");
                false
            }
        }
    }

    /// Current nesting depth; zero when no redraw is in progress.
    pub fn depth(&self) -> i32 {
        self.count.load(Ordering::Acquire)
    }

    pub fn is_drawing(&self) -> bool {
        self.depth() > 0
    }
}
