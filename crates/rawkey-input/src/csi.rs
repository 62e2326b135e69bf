// SPDX-License-Identifier: MIT
//
// CSI (Control Sequence Introducer) sequences: `ESC [ ...`.
//
// This is not a general CSI parameter parser. It recognizes the fixed
// shapes terminals actually send for keys, by position:
//
//   ESC [ A              arrows, Home/End, back-tab (final at [2])
//   ESC [ 1 ; m A        the same with a modifier digit m
//   ESC [ 3 ~            Insert/Delete/PageUp/PageDown
//   ESC [ 3 ; m ~        the same with a modifier
//   ESC [ P              F1-F4
//   ESC [ 1 ; m P        F1-F4 with a modifier
//   ESC [ 1 7 ~          F5-F12 (two-digit code)
//   ESC [ 1 7 ; m ~      F5-F12 with a modifier
//
// The shapes are tried in that order and the first one that fits wins.
//
// F5-F12 use the old VT220 numbering, which has gaps: 15, 17-21, 23, 24.
// The first digit selects a base (1 → 0, 2 → 9), the second digit is
// added, and one is subtracted past each gap. That gives 17 → F6 and
// 23 → F11. It also maps 11-14 to F1-F4 (rxvt) and 16 to F5 again,
// both of which are accepted.

use crate::ascii::{
    CSI_INTRO, DIGIT_ZERO, KEY_BACKTAB, KEY_DOWN, KEY_END, KEY_HOME, KEY_LEFT, KEY_RIGHT,
    KEY_UP, PARAM_SEP, TILDE,
};
use crate::decode::Parsed;
use crate::event::{Key, KeyEvent, MAX_FUNCTION_KEY, Modifiers};
use crate::modifier;
use crate::ss3;

/// Decode a CSI key sequence. `buf` starts with `ESC [`.
pub(crate) fn parse(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[1] == CSI_INTRO);

    let Some(&third) = buf.get(2) else {
        return Parsed::Incomplete;
    };
    let at = |i: usize| buf.get(i).copied();
    let has_modifier = at(3) == Some(PARAM_SEP);

    // ── Arrows, Home, End, back-tab ─────────────────────────────────
    if third == KEY_BACKTAB || is_cursor_final(third) {
        return cursor_key(third, None);
    }
    if has_modifier && at(5).is_some_and(is_cursor_final) {
        return cursor_key(buf[5], Some(buf[4]));
    }

    // ── Insert, Delete, PageUp, PageDown ────────────────────────────
    if at(3) == Some(TILDE) {
        return editing_key(third, None);
    }
    if has_modifier && at(5) == Some(TILDE) {
        return editing_key(third, Some(buf[4]));
    }

    // ── F1-F4 ───────────────────────────────────────────────────────
    if let (false, Some(key)) = (has_modifier, ss3::function_key(third)) {
        return Parsed::Event(KeyEvent::plain(key), 3);
    }

    let (Some(fourth), Some(fifth)) = (at(3), at(4)) else {
        return Parsed::Incomplete;
    };

    if has_modifier {
        let Some(final_byte) = at(5) else {
            return Parsed::Incomplete;
        };
        if let Some(key) = ss3::function_key(final_byte) {
            return with_modifier(key, fifth, 6);
        }
    }

    // ── F5-F12 ──────────────────────────────────────────────────────
    let Some(number) = vt220_function_number(third, fourth) else {
        return Parsed::Unrecognized;
    };
    let key = Key::F(number);

    if fifth == PARAM_SEP {
        return match (at(5), at(6)) {
            (Some(m), Some(TILDE)) => with_modifier(key, m, 7),
            (_, None) => Parsed::Incomplete,
            (_, Some(_)) => Parsed::Unrecognized,
        };
    }
    if fifth == TILDE {
        return Parsed::Event(KeyEvent::plain(key), 5);
    }
    Parsed::Unrecognized
}

const fn is_cursor_final(b: u8) -> bool {
    matches!(b, KEY_UP..=KEY_HOME)
}

/// Arrows, Home, End and back-tab by final byte, with an optional
/// modifier digit.
fn cursor_key(final_byte: u8, modifier_byte: Option<u8>) -> Parsed {
    let key = match final_byte {
        KEY_BACKTAB => {
            return Parsed::Event(KeyEvent::with(Key::Tab, Modifiers::SHIFT), 3);
        }
        KEY_UP => Key::Up,
        KEY_DOWN => Key::Down,
        KEY_RIGHT => Key::Right,
        KEY_LEFT => Key::Left,
        KEY_END => Key::End,
        KEY_HOME => Key::Home,
        _ => return Parsed::Unrecognized,
    };
    match modifier_byte {
        Some(m) => with_modifier(key, m, 6),
        None => Parsed::Event(KeyEvent::plain(key), 3),
    }
}

/// Tilde-terminated editing keys by their code digit.
fn editing_key(code: u8, modifier_byte: Option<u8>) -> Parsed {
    let key = match code {
        b'2' => Key::Insert,
        b'3' => Key::Delete,
        b'5' => Key::PageUp,
        b'6' => Key::PageDown,
        _ => return Parsed::Unrecognized,
    };
    match modifier_byte {
        Some(m) => with_modifier(key, m, 6),
        None => Parsed::Event(KeyEvent::plain(key), 4),
    }
}

fn with_modifier(key: Key, modifier_byte: u8, len: usize) -> Parsed {
    modifier::resolve(modifier_byte).map_or(Parsed::Unrecognized, |modifiers| {
        Parsed::Event(KeyEvent::with(key, modifiers), len)
    })
}

/// Map a two-digit VT220 function key code to its key number.
fn vt220_function_number(tens: u8, ones: u8) -> Option<u8> {
    if !ones.is_ascii_digit() {
        return None;
    }
    let ones = ones - DIGIT_ZERO;
    let number = match tens {
        b'1' if ones > 5 => ones - 1,
        b'1' => ones,
        b'2' if ones + 9 > 10 => ones + 8,
        b'2' => ones + 9,
        _ => return None,
    };
    (1..=MAX_FUNCTION_KEY).contains(&number).then_some(number)
}

// ─── Tests ──────────────────────────────────────────────────────────────────
