//! Controller runtime: registry, focus, draw batching, dispatch, and the run loop.

mod deferred;
mod draw;
mod focus;
mod handle;
mod listeners;
mod registry;
mod ui;
mod view;
mod wake;

pub use handle::UiHandle;
pub use listeners::KeyListener;
pub use ui::Ui;
pub use view::{UiManager, UiRef, View};
pub use wake::UiEvent;
