//! Compositor core for terminal UIs.
//!
//! Invariant: the backend is flushed only when the outermost draw scope closes, so any
//! burst of redraws (a focus change plus the refreshes its hooks request) reaches the
//! screen as one frame.
//!
//! # Public API Overview
//! - Register named [`View`]s with a [`Ui`] and position them with [`Bounds`].
//! - Move keyboard focus with [`Ui::set_active`]; characters go to the active view.
//! - Bind [`KeyListener`]s that see a [`Key`] before the active view does.
//! - Feed input and close the session from other threads through a [`UiHandle`].
//! - Paint through any [`Backend`]; [`MemoryBackend`] keeps an in-memory cell grid.

#![allow(clippy::new_without_default, clippy::type_complexity)]

pub mod config;
pub mod logging;

pub mod core;
pub mod error;
pub mod platform;
pub mod render;
pub mod runtime;

/// Cell attributes, geometry, and key identifiers.
pub use crate::core::attribute::Attribute;
pub use crate::core::geom::Bounds;
pub use crate::core::key::{Key, Modifier};

/// Output contract and the in-memory implementation.
pub use crate::core::backend::Backend;
pub use crate::render::{BufferCell, MemoryBackend};

/// Controller, its thread-safe handle, and the view/manager contracts.
pub use crate::runtime::{KeyListener, Ui, UiEvent, UiHandle, UiManager, UiRef, View};

pub use crate::error::{ParseKeyError, UiError};

/// Close the controller on SIGINT/SIGTERM.
#[cfg(unix)]
pub use crate::platform::{install_close_on_signal, SignalGuard};

/// Width-aware truncation helper.
pub use crate::core::text::truncate_to_width;
/// Display width of a string in terminal cells.
pub use crate::core::text::visible_width;
