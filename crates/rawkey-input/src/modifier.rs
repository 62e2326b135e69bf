// SPDX-License-Identifier: MIT
//
// Modifier byte resolution.
//
// CSI and SS3 sequences carry held modifiers as one ASCII digit encoding
// `1 + bitmask` (shift=1, alt=2, ctrl=4, meta=8). Only sequences already
// known to be in their modified form reach this module, so the digit
// `'1'` (an empty bitmask) is read as Meta alone.

use crate::ascii::{DIGIT_NINE, DIGIT_ONE};
use crate::event::Modifiers;

/// Decode a transmitted modifier digit.
///
/// Returns `None` for anything outside `'1'..='9'`.
#[must_use]
pub const fn resolve(byte: u8) -> Option<Modifiers> {
    if !matches!(byte, DIGIT_ONE..=DIGIT_NINE) {
        return None;
    }
    let numeric = byte - DIGIT_ONE;
    let mut modifiers = Modifiers::from_bits_truncate(numeric);
    if numeric == 0 {
        modifiers = modifiers.union(Modifiers::META);
    }
    Some(modifiers)
}
