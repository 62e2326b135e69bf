// SPDX-License-Identifier: MIT
//
// SS3 (Single Shift 3) sequences: `ESC O <final>`.
//
// Terminals use SS3 for F1-F4 (`ESC O P` .. `ESC O S`), and for keypad
// Enter (`ESC O M`), which we report as Shift+Return. A modified F1-F4
// puts the modifier digit between the introducer and the final byte:
// `ESC O 5 P` is Ctrl+F1.

use crate::ascii::{KEY_KP_ENTER, SS3_INTRO};
use crate::decode::Parsed;
use crate::event::{Key, KeyEvent, Modifiers};
use crate::modifier;

/// Decode an SS3 sequence. `buf` starts with `ESC O`.
pub(crate) fn parse(buf: &[u8]) -> Parsed {
    debug_assert!(buf.len() >= 2 && buf[1] == SS3_INTRO);

    let Some(&third) = buf.get(2) else {
        return Parsed::Incomplete;
    };

    if third == KEY_KP_ENTER {
        return Parsed::Event(KeyEvent::with(Key::Return, Modifiers::SHIFT), 3);
    }

    if third > SS3_INTRO {
        return function_key(third).map_or(Parsed::Unrecognized, |key| {
            Parsed::Event(KeyEvent::plain(key), 3)
        });
    }

    let Some(&fourth) = buf.get(3) else {
        return Parsed::Incomplete;
    };

    match (function_key(fourth), modifier::resolve(third)) {
        (Some(key), Some(modifiers)) => Parsed::Event(KeyEvent::with(key, modifiers), 4),
        _ => Parsed::Unrecognized,
    }
}

/// F1-F4 from a final byte `P`..`S`.
pub(crate) fn function_key(final_byte: u8) -> Option<Key> {
    match final_byte.checked_sub(SS3_INTRO) {
        Some(n @ 1..=4) => Some(Key::F(n)),
        _ => None,
    }
}
