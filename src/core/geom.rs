//! Character-cell rectangles.

/// Element bounds: left/top inclusive, right/bottom exclusive.
///
/// Bounds are stored as given. Inverted or negative rectangles are not rejected; `width` and
/// `height` clamp at zero so views can iterate without special-casing them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Bounds {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> i32 {
        self.x1.saturating_sub(self.x0).max(0)
    }

    pub fn height(&self) -> i32 {
        self.y1.saturating_sub(self.y0).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

impl From<(i32, i32, i32, i32)> for Bounds {
    fn from((x0, y0, x1, y1): (i32, i32, i32, i32)) -> Self {
        Self::new(x0, y0, x1, y1)
    }
}
