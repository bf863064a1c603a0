//! Hook scopes and requests deferred until the outermost hook returns.
//!
//! A view is mutably borrowed while one of its hooks runs, so controller operations that
//! would call hooks again are queued and replayed, in order, once the scope depth is zero.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::core::geom::Bounds;
use crate::core::key::{Key, Modifier};
use crate::runtime::view::ViewRc;

pub(crate) enum Deferred {
    Refresh,
    SetActive(String),
    Bounds(ViewRc, Bounds),
    Character(char),
    Key(Modifier, Key),
}

impl std::fmt::Debug for Deferred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Deferred::Refresh => f.write_str("Refresh"),
            Deferred::SetActive(name) => f.debug_tuple("SetActive").field(name).finish(),
            Deferred::Bounds(_, bounds) => f.debug_tuple("Bounds").field(bounds).finish(),
            Deferred::Character(ch) => f.debug_tuple("Character").field(ch).finish(),
            Deferred::Key(modifier, key) => {
                f.debug_tuple("Key").field(modifier).field(key).finish()
            }
        }
    }
}

#[derive(Default)]
pub(crate) struct DeferredQueue {
    depth: Cell<usize>,
    paint_depth: Cell<usize>,
    draining: Cell<bool>,
    queue: RefCell<VecDeque<Deferred>>,
}

/// Open hook scope; closes on drop, including during unwinding.
pub(crate) struct HookScope<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for HookScope<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

/// Marks the queue as draining; cleared on drop.
pub(crate) struct DrainScope<'a> {
    draining: &'a Cell<bool>,
}

impl Drop for DrainScope<'_> {
    fn drop(&mut self) {
        self.draining.set(false);
    }
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self) -> HookScope<'_> {
        self.depth.set(self.depth.get() + 1);
        HookScope { depth: &self.depth }
    }

    pub fn in_hook(&self) -> bool {
        self.depth.get() > 0
    }

    /// Open a paint scope: draw hooks are running and a nested redraw becomes a repaint request.
    pub fn enter_paint(&self) -> HookScope<'_> {
        self.paint_depth.set(self.paint_depth.get() + 1);
        HookScope {
            depth: &self.paint_depth,
        }
    }

    pub fn is_painting(&self) -> bool {
        self.paint_depth.get() > 0
    }

    /// Queue a request. Consecutive refreshes collapse into one.
    pub fn push(&self, request: Deferred) {
        let mut queue = self.queue.borrow_mut();
        if matches!(request, Deferred::Refresh) && matches!(queue.back(), Some(Deferred::Refresh))
        {
            return;
        }
        tracing::trace!(?request, "deferred until hook returns");
        queue.push_back(request);
    }

    /// Start draining, unless a hook is still open or a drain is already running further up
    /// the stack (that drain picks up anything queued meanwhile).
    pub fn begin_drain(&self) -> Option<DrainScope<'_>> {
        if self.in_hook() || self.draining.get() {
            return None;
        }
        self.draining.set(true);
        Some(DrainScope {
            draining: &self.draining,
        })
    }

    pub fn pop(&self) -> Option<Deferred> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }
}
