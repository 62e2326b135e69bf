// SPDX-License-Identifier: MIT
//
// Key event types.
//
// A decoded key press is a `Key` plus a `Modifiers` set. Keys are either
// a character exactly as typed or one name from a fixed vocabulary
// (arrows, editing keys, F1-F12, ...). Both types print in the same
// lowercase chord notation they parse from: `ctrl+alt+delete`, `shift+A`,
// `f6`.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

// ─── Key ────────────────────────────────────────────────────────────────────

/// Identity of a key.
///
/// Printable characters use [`Char`](Key::Char) and keep the case they
/// were typed with. Everything else has a dedicated variant. Function
/// keys produced by the decoder are always in `F(1)..=F(12)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A Unicode character.
    Char(char),
    Space,
    Return,
    Escape,
    Backspace,
    Tab,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    // ── Editing ─────────────────────────────────────────────────
    Insert,
    Delete,
    PageUp,
    PageDown,
    // ── Function keys ───────────────────────────────────────────
    /// F1 through F12.
    F(u8),
}

/// Highest function key number in the vocabulary.
pub const MAX_FUNCTION_KEY: u8 = 12;

impl Key {
    /// The vocabulary name of a named key, or `None` for characters and
    /// function keys.
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::Space => "space",
            Self::Return => "return",
            Self::Escape => "escape",
            Self::Backspace => "backspace",
            Self::Tab => "tab",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Home => "home",
            Self::End => "end",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::PageUp => "pageup",
            Self::PageDown => "pagedown",
            Self::Char(_) | Self::F(_) => return None,
        })
    }

    /// Look up a named key by its vocabulary name.
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "space" => Self::Space,
            "return" => Self::Return,
            "escape" => Self::Escape,
            "backspace" => Self::Backspace,
            "tab" => Self::Tab,
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "home" => Self::Home,
            "end" => Self::End,
            "insert" => Self::Insert,
            "delete" => Self::Delete,
            "pageup" => Self::PageUp,
            "pagedown" => Self::PageDown,
            _ => return None,
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::F(n) => write!(f, "f{n}"),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

impl FromStr for Key {
    type Err = ParseKeyError;

    /// Parse a vocabulary name (`"pageup"`, `"f11"`) or a single character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => return Err(ParseKeyError::Empty),
            (Some(c), None) => return Ok(Self::Char(c)),
            _ => {}
        }

        if let Some(key) = Self::from_name(s) {
            return Ok(key);
        }

        match s.strip_prefix('f') {
            Some(digits) if digits.bytes().all(|b| b.is_ascii_digit()) => {
                let n: u8 = digits
                    .parse()
                    .map_err(|_| ParseKeyError::UnknownKey(s.to_owned()))?;
                if (1..=MAX_FUNCTION_KEY).contains(&n) {
                    Ok(Self::F(n))
                } else {
                    Err(ParseKeyError::FunctionKeyOutOfRange(n))
                }
            }
            _ => Err(ParseKeyError::UnknownKey(s.to_owned())),
        }
    }
}

// ─── Modifiers ──────────────────────────────────────────────────────────────

bitflags! {
    /// Keyboard modifier flags.
    ///
    /// Bit positions match the xterm modifier parameter, which is sent as
    /// `1 + bitmask`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const META  = 0b0000_1000;
    }
}

/// Chord prefixes in print order.
const MODIFIER_NAMES: [(Modifiers, &str); 4] = [
    (Modifiers::CTRL, "ctrl"),
    (Modifiers::ALT, "alt"),
    (Modifiers::SHIFT, "shift"),
    (Modifiers::META, "meta"),
];

fn modifier_from_name(name: &str) -> Option<Modifiers> {
    MODIFIER_NAMES
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(m, _)| *m)
}

// ─── KeyEvent ───────────────────────────────────────────────────────────────

/// One decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key was pressed.
    pub key: Key,
    /// Modifier keys held with it.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// A key press with the given modifiers.
    #[must_use]
    pub const fn with(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    #[must_use]
    pub const fn meta(&self) -> bool {
        self.modifiers.contains(Modifiers::META)
    }
}

impl From<Key> for KeyEvent {
    fn from(key: Key) -> Self {
        Self::plain(key)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in MODIFIER_NAMES {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

impl FromStr for KeyEvent {
    type Err = ParseKeyError;

    /// Parse chord notation: zero or more `+`-joined modifier names
    /// followed by a key, e.g. `"ctrl+shift+up"` or `"alt++"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "+" {
            return Ok(Self::plain(Key::Char('+')));
        }
        let (prefix, key) = match s.strip_suffix("++") {
            Some(prefix) => (prefix, "+"),
            None => s.rsplit_once('+').unwrap_or(("", s)),
        };

        let mut modifiers = Modifiers::empty();
        if !prefix.is_empty() {
            for name in prefix.split('+') {
                modifiers |= modifier_from_name(name)
                    .ok_or_else(|| ParseKeyError::UnknownModifier(name.to_owned()))?;
            }
        }

        Ok(Self::with(key.parse()?, modifiers))
    }
}

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Failure to parse a key name or chord.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("empty key name")]
    Empty,
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("function key f{0} is outside f1..f12")]
    FunctionKeyOutOfRange(u8),
    #[error("unknown modifier `{0}` (expected ctrl, alt, shift or meta)")]
    UnknownModifier(String),
}

// ─── Tests ──────────────────────────────────────────────────────────────────
