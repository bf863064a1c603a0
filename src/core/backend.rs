//! Terminal backend contract.

use crate::core::attribute::Attribute;

/// Character-cell renderer the controller draws into.
///
/// Painting goes to an off-screen buffer; nothing reaches the terminal until `flush`.
/// The controller calls `flush` exactly once per outermost redraw.
pub trait Backend {
    /// Whether the backend has been set up and may be drawn to.
    fn is_initialized(&self) -> bool;

    /// Reset the off-screen buffer to blank cells with the given attributes.
    fn clear(&mut self, fg: Attribute, bg: Attribute);

    fn hide_cursor(&mut self);

    /// Show the cursor at the given cell.
    fn set_cursor(&mut self, _x: i32, _y: i32) {}

    /// Paint one cell. Out-of-range coordinates are ignored by the backend.
    fn set_cell(&mut self, x: i32, y: i32, ch: char, fg: Attribute, bg: Attribute);

    /// Transfer the off-screen buffer to the terminal.
    fn flush(&mut self);
}
