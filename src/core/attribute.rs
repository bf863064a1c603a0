//! Display attributes passed through to the backend.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Opaque styling token: low byte is a color index, high byte carries style bits.
///
/// The controller never interprets attributes; it hands them to the backend as-is.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Attribute(u16);

impl Attribute {
    pub const DEFAULT: Attribute = Attribute(0x0000);
    pub const BLACK: Attribute = Attribute(0x0001);
    pub const RED: Attribute = Attribute(0x0002);
    pub const GREEN: Attribute = Attribute(0x0003);
    pub const YELLOW: Attribute = Attribute(0x0004);
    pub const BLUE: Attribute = Attribute(0x0005);
    pub const MAGENTA: Attribute = Attribute(0x0006);
    pub const CYAN: Attribute = Attribute(0x0007);
    pub const WHITE: Attribute = Attribute(0x0008);

    pub const BOLD: Attribute = Attribute(0x0100);
    pub const UNDERLINE: Attribute = Attribute(0x0200);
    pub const REVERSE: Attribute = Attribute(0x0400);

    const COLOR_MASK: u16 = 0x00ff;

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Color index without style bits.
    pub const fn color(self) -> u8 {
        (self.0 & Self::COLOR_MASK) as u8
    }

    /// Style bits without the color index.
    pub const fn style(self) -> Attribute {
        Attribute(self.0 & !Self::COLOR_MASK)
    }

    /// Whether every style bit in `other` is set. Color is ignored.
    pub const fn has_style(self, other: Attribute) -> bool {
        let style = other.0 & !Self::COLOR_MASK;
        self.0 & style == style
    }
}

impl BitOr for Attribute {
    type Output = Attribute;

    fn bitor(self, rhs: Self) -> Self::Output {
        Attribute(self.0 | rhs.0)
    }
}

impl BitOrAssign for Attribute {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attribute({:#06x})", self.0)
    }
}
