//! Key identifiers and modifier sets delivered by the input source.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::ParseKeyError;

bitflags! {
    /// Modifiers held while a key was pressed.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifier: u8 {
        const ALT = 1;
        const CTRL = 1 << 1;
        const SHIFT = 1 << 2;
    }
}

impl fmt::Display for Modifier {
    /// Lowercase names joined with `+` (`"alt+ctrl"`); empty for no modifiers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (name, _)) in self.iter_names().enumerate() {
            if idx > 0 {
                f.write_str("+")?;
            }
            f.write_str(&name.to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Non-character key identifier.
///
/// Identifiers render as lowercase key ids (`"ctrl+a"`, `"f5"`, `"pageup"`) and parse back
/// case-insensitively, so listener bindings can live in configuration. `Ctrl` chords compare
/// case-insensitively once [`Key::normalized`]; the controller normalizes every key it
/// dispatches or binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Function key `F1`..=`F12`.
    F(u8),
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Backspace,
    Escape,
    Space,
    /// Control chord with a lowercase ASCII letter or symbol.
    Ctrl(char),
}

impl Key {
    /// `Ctrl` chord, normalizing the letter to lowercase.
    pub fn ctrl(ch: char) -> Self {
        Key::Ctrl(ch.to_ascii_lowercase())
    }

    /// Same key with any `Ctrl` letter lowercased.
    pub fn normalized(self) -> Self {
        match self {
            Key::Ctrl(ch) => Key::ctrl(ch),
            other => other,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::F(n) => write!(f, "f{n}"),
            Key::Insert => f.write_str("insert"),
            Key::Delete => f.write_str("delete"),
            Key::Home => f.write_str("home"),
            Key::End => f.write_str("end"),
            Key::PageUp => f.write_str("pageup"),
            Key::PageDown => f.write_str("pagedown"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Enter => f.write_str("enter"),
            Key::Tab => f.write_str("tab"),
            Key::Backspace => f.write_str("backspace"),
            Key::Escape => f.write_str("escape"),
            Key::Space => f.write_str("space"),
            Key::Ctrl(ch) => write!(f, "ctrl+{}", ch.to_ascii_lowercase()),
        }
    }
}

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let id = input.trim().to_ascii_lowercase();
        if let Some(rest) = id.strip_prefix("ctrl+") {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii_graphic() => Ok(Key::Ctrl(ch)),
                _ => Err(ParseKeyError::new(input)),
            };
        }

        let key = match id.as_str() {
            "insert" => Key::Insert,
            "delete" => Key::Delete,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "enter" => Key::Enter,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "escape" | "esc" => Key::Escape,
            "space" => Key::Space,
            other => {
                let n = other
                    .strip_prefix('f')
                    .and_then(|digits| digits.parse::<u8>().ok())
                    .filter(|n| (1..=12).contains(n))
                    .ok_or_else(|| ParseKeyError::new(input))?;
                Key::F(n)
            }
        };
        Ok(key)
    }
}
