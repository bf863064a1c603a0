//! Controller: element registry, focus, batched redraws, and input dispatch.
//!
//! Invariant: the backend is flushed only when the outermost draw scope closes.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::core::attribute::Attribute;
use crate::core::backend::Backend;
use crate::core::geom::Bounds;
use crate::core::key::{Key, Modifier};
use crate::core::text;
use crate::error::UiError;
use crate::runtime::deferred::{Deferred, DeferredQueue};
use crate::runtime::draw::DrawBatcher;
use crate::runtime::focus::FocusState;
use crate::runtime::handle::{lock_backend, SharedBackend, UiHandle};
use crate::runtime::listeners::KeyListeners;
use crate::runtime::registry::ElementRegistry;
use crate::runtime::view::{UiManager, UiRef, View, ViewRc};
use crate::runtime::wake::{UiEvent, UiWake};

/// Upper bound on back-to-back paint passes for one refresh.
const MAX_PAINT_PASSES: usize = 8;

/// The compositor controller.
///
/// A `Ui` lives behind an [`Rc`] on one thread: registry mutation, focus changes, and
/// dispatch all happen there. Other threads talk to it through [`Ui::handle`].
pub struct Ui {
    this: Weak<Ui>,
    fg: Cell<Attribute>,
    bg: Cell<Attribute>,
    manager: RefCell<Box<dyn UiManager>>,
    backend: SharedBackend,
    wake: Arc<UiWake>,
    terminated: Cell<bool>,
    draw: DrawBatcher,
    repaint: Cell<bool>,
    registry: RefCell<ElementRegistry>,
    focus: RefCell<FocusState>,
    listeners: RefCell<KeyListeners>,
    deferred: DeferredQueue,
}

/// Closes one draw scope on drop, flushing when it was the outermost.
struct DrawScope<'a> {
    ui: &'a Ui,
}

impl Drop for DrawScope<'_> {
    fn drop(&mut self) {
        self.ui.end_draw();
    }
}

impl Ui {
    pub fn new<M, B>(manager: M, backend: B) -> Rc<Self>
    where
        M: UiManager + 'static,
        B: Backend + Send + 'static,
    {
        let backend: Box<dyn Backend + Send> = Box::new(backend);
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            fg: Cell::new(Attribute::DEFAULT),
            bg: Cell::new(Attribute::DEFAULT),
            manager: RefCell::new(Box::new(manager)),
            backend: Arc::new(Mutex::new(backend)),
            wake: Arc::new(UiWake::default()),
            terminated: Cell::new(false),
            draw: DrawBatcher::new(),
            repaint: Cell::new(false),
            registry: RefCell::new(ElementRegistry::new()),
            focus: RefCell::new(FocusState::new()),
            listeners: RefCell::new(KeyListeners::new()),
            deferred: DeferredQueue::new(),
        })
    }

    /// Handle for the input source and other threads.
    pub fn handle(&self) -> UiHandle {
        UiHandle::new(Arc::clone(&self.wake), Arc::clone(&self.backend))
    }

    pub fn colors(&self) -> (Attribute, Attribute) {
        (self.fg.get(), self.bg.get())
    }

    /// Attributes the screen is cleared with on every redraw.
    pub fn set_colors(&self, fg: Attribute, bg: Attribute) {
        self.fg.set(fg);
        self.bg.set(bg);
    }

    // Lifecycle.

    /// Notify the manager, then block until [`Ui::close`] is observed.
    ///
    /// Events posted through a [`UiHandle`] meanwhile are dispatched here in order; events
    /// queued before the close signal are still delivered. Returns immediately once the
    /// controller has terminated.
    pub fn run(&self) {
        if self.terminated.get() {
            tracing::debug!("run ignored: already terminated");
            return;
        }

        match self.manager.try_borrow_mut() {
            Ok(mut manager) => manager.on_ui_initialize(self),
            Err(_) => tracing::warn!("manager busy; initialize hook skipped"),
        }

        loop {
            let batch = self.wake.wait();
            for event in batch.events {
                self.dispatch(event);
            }
            if batch.close {
                self.terminated.set(true);
                tracing::info!("ui terminated");
                return;
            }
        }
    }

    /// Raise the close signal. No-op while the backend is not initialized.
    pub fn close(&self) {
        self.handle().close();
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.get()
    }

    /// Route one event to its entry point.
    pub fn dispatch(&self, event: UiEvent) {
        tracing::trace!(?event, "dispatch");
        match event {
            UiEvent::Character(ch) => self.on_character_event(ch),
            UiEvent::Key(modifier, key) => self.on_key_event(modifier, key),
            UiEvent::Resize { width, height } => self.on_resize(width, height),
            UiEvent::Refresh => self.refresh(),
            UiEvent::SetActive(name) => self.set_active(&name),
        }
    }

    fn on_resize(&self, width: i32, height: i32) {
        match self.manager.try_borrow_mut() {
            Ok(mut manager) => manager.on_ui_resize(self, width, height),
            Err(_) => tracing::warn!(width, height, "manager busy; resize dropped"),
        }
    }

    // Registry.

    /// Register `view` under `name` with zero bounds and run its `initialize` hook.
    pub fn add(&self, name: impl Into<String>, view: impl View + 'static) -> Result<(), UiError> {
        self.add_boxed(name, Box::new(view))
    }

    pub fn add_boxed(&self, name: impl Into<String>, view: Box<dyn View>) -> Result<(), UiError> {
        let name = name.into();
        let view = self
            .registry
            .borrow_mut()
            .insert(&name, view)
            .inspect_err(|err| tracing::debug!(%err, "add rejected"))?;
        tracing::debug!(name = %name, "element added");

        let ui = UiRef::new(self.this.clone());
        self.call_hook(&view, |view| view.initialize(ui));
        Ok(())
    }

    /// Store new bounds for `name` and forward them to its view. Bounds are not validated.
    pub fn set_bounds(&self, name: &str, bounds: impl Into<Bounds>) -> Result<(), UiError> {
        let bounds = bounds.into();
        let view = self
            .registry
            .borrow_mut()
            .set_bounds(name, bounds)
            .inspect_err(|err| tracing::debug!(%err, "set_bounds rejected"))?;
        tracing::trace!(name, ?bounds, "bounds set");

        if self.deferred.in_hook() {
            self.deferred.push(Deferred::Bounds(view, bounds));
            return Ok(());
        }
        self.call_hook(&view, |view| view.set_bounds(bounds));
        Ok(())
    }

    pub fn bounds(&self, name: &str) -> Option<Bounds> {
        self.registry.borrow().bounds(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.borrow().contains(name)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.registry.borrow().names()
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().is_empty()
    }

    // Focus.

    pub fn active(&self) -> Option<String> {
        self.focus.borrow().active().map(str::to_owned)
    }

    /// Move focus to `name`, then redraw.
    ///
    /// The previous element is deactivated before the next one is activated, and the redraw
    /// only starts once both hooks have returned. An unknown name just deactivates.
    pub fn set_active(&self, name: &str) {
        if self.deferred.in_hook() {
            self.deferred.push(Deferred::SetActive(name.to_owned()));
            return;
        }

        let target = self.contains(name).then_some(name);
        let transition = self.focus.borrow().plan(target);
        tracing::debug!(
            from = ?transition.deactivate,
            to = ?transition.activate,
            "focus transition"
        );

        self.batched(|| {
            self.with_hook_scope(|| {
                let previous = transition
                    .deactivate
                    .as_deref()
                    .and_then(|prev| self.registry.borrow().view(prev));
                if let Some(view) = previous {
                    self.call_hook(&view, |view| view.set_active(false));
                }

                self.focus.borrow_mut().commit(transition.activate.clone());

                let next = transition
                    .activate
                    .as_deref()
                    .and_then(|next| self.registry.borrow().view(next));
                if let Some(view) = next {
                    self.call_hook(&view, |view| view.set_active(true));
                }
            });
            self.refresh();
        });
    }

    fn active_view(&self) -> Option<ViewRc> {
        let focus = self.focus.borrow();
        let name = focus.active()?;
        self.registry.borrow().view(name)
    }

    // Drawing.

    /// Redraw every element: clear, hide the cursor, run each draw hook, flush once.
    ///
    /// Reentrant: a draw hook that calls `refresh` gets a complete repaint of every element
    /// once the current pass ends, inside the same batch, and only the outermost call
    /// flushes. Elements are drawn in no particular order.
    pub fn refresh(&self) {
        if !self.backend_initialized() {
            tracing::trace!("refresh skipped: backend not initialized");
            return;
        }
        if self.deferred.is_painting() {
            tracing::trace!("repaint requested from a draw hook");
            self.repaint.set(true);
            return;
        }
        if self.deferred.in_hook() {
            self.deferred.push(Deferred::Refresh);
            return;
        }

        let _draw = self.begin_draw();
        let mut passes = 0;
        loop {
            passes += 1;
            self.paint_pass();
            if !self.repaint.replace(false) {
                break;
            }
            if passes == MAX_PAINT_PASSES {
                tracing::warn!(passes, "draw hooks keep requesting repaints; frame kept as is");
                break;
            }
        }
        self.drain_deferred();
    }

    /// Clear, hide the cursor, and run every draw hook once.
    fn paint_pass(&self) {
        {
            let (fg, bg) = self.colors();
            let mut backend = self.lock_backend();
            backend.clear(fg, bg);
            backend.hide_cursor();
        }

        let views = self.registry.borrow().views();
        let _paint = self.deferred.enter_paint();
        let _scope = self.deferred.enter();
        for view in &views {
            match view.try_borrow_mut() {
                Ok(mut view) => view.draw(self),
                Err(_) => tracing::warn!("view busy in another hook; skipped in this pass"),
            }
        }
    }

    /// Whether a redraw is in progress on this controller.
    pub fn is_drawing(&self) -> bool {
        self.draw.is_drawing()
    }

    fn begin_draw(&self) -> DrawScope<'_> {
        let depth = self.draw.begin();
        tracing::trace!(depth, "draw begin");
        DrawScope { ui: self }
    }

    fn end_draw(&self) {
        if self.draw.end() {
            tracing::trace!("flush");
            self.lock_backend().flush();
        }
    }

    /// Run `f` inside one draw scope so every refresh it triggers shares a single flush.
    fn batched<R>(&self, f: impl FnOnce() -> R) -> R {
        let _draw = self.backend_initialized().then(|| self.begin_draw());
        f()
    }

    fn backend_initialized(&self) -> bool {
        self.lock_backend().is_initialized()
    }

    fn lock_backend(&self) -> MutexGuard<'_, Box<dyn Backend + Send>> {
        lock_backend(&self.backend)
    }

    /// Paint one cell through the backend.
    pub fn set_cell(&self, x: i32, y: i32, ch: char, fg: Attribute, bg: Attribute) {
        self.lock_backend().set_cell(x, y, ch, fg, bg);
    }

    pub fn set_cursor(&self, x: i32, y: i32) {
        self.lock_backend().set_cursor(x, y);
    }

    /// Paint `text` starting at `(x, y)`, one grapheme per cell run.
    ///
    /// Returns the number of columns advanced. No clipping beyond what the backend does.
    pub fn print(&self, x: i32, y: i32, text: &str, fg: Attribute, bg: Attribute) -> i32 {
        let mut backend = self.lock_backend();
        let mut advance = 0;
        for (offset, ch, width) in text::cells(text) {
            let column = x.saturating_add(i32::try_from(offset).unwrap_or(i32::MAX));
            backend.set_cell(column, y, ch, fg, bg);
            advance = offset + width;
        }
        i32::try_from(advance).unwrap_or(i32::MAX)
    }

    // Input.

    /// Deliver a decoded character to the active view. Dropped when nothing is active.
    pub fn on_character_event(&self, ch: char) {
        if self.deferred.in_hook() {
            self.deferred.push(Deferred::Character(ch));
            return;
        }
        let Some(view) = self.active_view() else {
            tracing::trace!(?ch, "character dropped: no active element");
            return;
        };
        self.call_hook(&view, |view| view.character_event(self, ch));
    }

    /// Run every listener bound to `key` in registration order, then the active view's hook.
    ///
    /// Nothing can stop propagation: listeners and the active view always both run. `Ctrl`
    /// chords are matched case-insensitively.
    pub fn on_key_event(&self, modifier: Modifier, key: Key) {
        let key = key.normalized();
        if self.deferred.in_hook() {
            self.deferred.push(Deferred::Key(modifier, key));
            return;
        }

        let listeners = self.listeners.borrow().for_key(key);
        for listener in listeners {
            listener(self, key);
        }

        if let Some(view) = self.active_view() {
            self.call_hook(&view, |view| view.key_event(self, modifier, key));
        }
    }

    /// Bind `listener` to `key`. Listeners live as long as the controller.
    pub fn add_key_listener<F>(&self, key: Key, listener: F)
    where
        F: Fn(&Ui, Key) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        listeners.add(key, Rc::new(listener));
        tracing::debug!(%key, bound = listeners.len(key), "key listener added");
    }

    // Hook plumbing.

    fn call_hook<R>(&self, view: &ViewRc, hook: impl FnOnce(&mut dyn View) -> R) -> Option<R> {
        let result = {
            let Ok(mut view) = view.try_borrow_mut() else {
                tracing::warn!("view hook skipped: view is already running a hook");
                return None;
            };
            let _scope = self.deferred.enter();
            hook(&mut **view)
        };
        self.drain_deferred();
        Some(result)
    }

    fn with_hook_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        let result = {
            let _scope = self.deferred.enter();
            f()
        };
        self.drain_deferred();
        result
    }

    fn drain_deferred(&self) {
        let Some(_drain) = self.deferred.begin_drain() else {
            return;
        };
        if self.deferred.len() == 0 {
            return;
        }
        self.batched(|| {
            while let Some(request) = self.deferred.pop() {
                self.apply(request);
            }
        });
    }

    fn apply(&self, request: Deferred) {
        match request {
            Deferred::Refresh => self.refresh(),
            Deferred::SetActive(name) => self.set_active(&name),
            Deferred::Bounds(view, bounds) => {
                self.call_hook(&view, |view| view.set_bounds(bounds));
            }
            Deferred::Character(ch) => self.on_character_event(ch),
            Deferred::Key(modifier, key) => self.on_key_event(modifier, key),
        }
    }
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("elements", &self.len())
            .field("active", &self.active())
            .field("draw_depth", &self.draw.depth())
            .field("terminated", &self.terminated.get())
            .finish()
    }
}
