// SPDX-License-Identifier: MIT
//
// Byte names for the decoder.
//
// Every byte value the decoders compare against has a name here, so
// branch conditions read as `b == ESC` or `(SYMBOL_START..=SYMBOL_END)`
// instead of bare numbers. Nothing in this module has behavior.

// ─── Control codes ──────────────────────────────────────────────────────────

/// NUL, sent for Ctrl+Space (and Ctrl+@).
pub const NUL: u8 = 0x00;
/// Backspace (Ctrl+H). Some terminals send this for the Backspace key.
pub const BACKSPACE: u8 = 0x08;
pub const TAB: u8 = 0x09;
/// Line feed. Arrives for Ctrl+J.
pub const LF: u8 = 0x0A;
/// Carriage return. The Return key in raw mode.
pub const CR: u8 = 0x0D;
/// Cancel. First byte of the legacy `CAN @ s` meta prefix.
pub const CANCEL: u8 = 0x18;
pub const ESC: u8 = 0x1B;
pub const SPACE: u8 = 0x20;
/// Delete. Most terminals send this for the Backspace key.
pub const DEL: u8 = 0x7F;

/// Highest byte of the Ctrl+letter range (`'z' - 96`).
pub const CTRL_LETTER_END: u8 = 0x1A;
/// Lowest byte of the Ctrl+letter range (`'a' - 96`).
pub const CTRL_LETTER_START: u8 = 0x01;

// ─── Printable ranges ───────────────────────────────────────────────────────

/// `!` through `@`: punctuation and digits.
pub const SYMBOL_START: u8 = b'!';
pub const SYMBOL_END: u8 = b'@';
pub const UPPER_START: u8 = b'A';
pub const UPPER_END: u8 = b'Z';
/// `[` through `~`: brackets, lowercase letters and the rest of ASCII.
pub const LOWER_START: u8 = b'[';
pub const LOWER_END: u8 = b'~';

pub const DIGIT_ZERO: u8 = b'0';
pub const DIGIT_ONE: u8 = b'1';
pub const DIGIT_NINE: u8 = b'9';

// ─── Sequence bytes ─────────────────────────────────────────────────────────

/// Second byte of a CSI introducer (`ESC [`).
pub const CSI_INTRO: u8 = b'[';
/// Second byte of an SS3 introducer (`ESC O`). Also the base for
/// function key numbering: `'P' - 'O'` is F1.
pub const SS3_INTRO: u8 = b'O';
pub const PARAM_SEP: u8 = b';';
pub const TILDE: u8 = b'~';

pub const KEY_UP: u8 = b'A';
pub const KEY_DOWN: u8 = b'B';
pub const KEY_RIGHT: u8 = b'C';
pub const KEY_LEFT: u8 = b'D';
pub const KEY_END: u8 = b'F';
pub const KEY_HOME: u8 = b'H';
/// `ESC O M`: keypad Enter, reported as Shift+Return.
pub const KEY_KP_ENTER: u8 = b'M';
/// `ESC [ Z`: back-tab.
pub const KEY_BACKTAB: u8 = b'Z';

/// Legacy meta prefix `CAN @ s`, sent ahead of a key held with Meta.
pub const META_PREFIX: [u8; 3] = [CANCEL, b'@', b's'];
