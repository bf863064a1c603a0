//! View and manager contracts.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::core::geom::Bounds;
use crate::core::key::{Key, Modifier};
use crate::runtime::ui::Ui;

/// Screen region driven by the controller.
///
/// The controller owns each view for its whole lifetime and never downcasts it. Hooks that
/// receive `&Ui` may call back into the controller; requests made while a hook is running
/// are applied as soon as that hook returns.
pub trait View {
    /// Called once when the view is added. `ui` is a weak back-reference for later use
    /// (e.g. redraw requests from timers owned by the view).
    fn initialize(&mut self, _ui: UiRef) {}

    /// New bounds assigned by the application.
    fn set_bounds(&mut self, _bounds: Bounds) {}

    /// Focus gained (`true`) or lost (`false`).
    fn set_active(&mut self, _active: bool) {}

    /// Paint the view through [`Ui::set_cell`] / [`Ui::print`].
    fn draw(&mut self, ui: &Ui);

    /// Decoded character typed while this view is active.
    fn character_event(&mut self, _ui: &Ui, _ch: char) {}

    /// Key pressed while this view is active. Key listeners have already run.
    fn key_event(&mut self, _ui: &Ui, _modifier: Modifier, _key: Key) {}
}

pub(crate) type ViewRc = Rc<RefCell<Box<dyn View>>>;

/// Application-side collaborator notified on startup and resize.
pub trait UiManager {
    /// Called once from [`Ui::run`] before it blocks.
    fn on_ui_initialize(&mut self, ui: &Ui);

    /// Terminal dimensions changed.
    fn on_ui_resize(&mut self, ui: &Ui, width: i32, height: i32);
}

/// Weak back-reference to the controller handed to views.
#[derive(Clone)]
pub struct UiRef {
    ui: Weak<Ui>,
}

impl UiRef {
    pub(crate) fn new(ui: Weak<Ui>) -> Self {
        Self { ui }
    }

    /// The controller, unless it has been dropped.
    pub fn upgrade(&self) -> Option<Rc<Ui>> {
        self.ui.upgrade()
    }

    /// Request a full redraw if the controller is still alive.
    pub fn refresh(&self) {
        if let Some(ui) = self.upgrade() {
            ui.refresh();
        }
    }
}

impl std::fmt::Debug for UiRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiRef")
            .field("alive", &(self.ui.strong_count() > 0))
            .finish()
    }
}
