// SPDX-License-Identifier: MIT
//
// Legacy and UTF-8 input.
//
// Everything that isn't a CSI or SS3 sequence lands here: plain ASCII,
// control codes, the Alt convention (ESC in front of the key), the old
// `CAN @ s` Meta prefix, and multi-byte UTF-8 characters.
//
// The control-code branches run in a fixed order and that order is
// observable. Tab (0x09) and CR (0x0D) sit inside the Ctrl+letter range
// but are matched first, so Ctrl+I arrives as Tab and Ctrl+M as Return.
// LF (0x0A) is matched first too and reported as Ctrl+J.

use crate::ascii::{
    BACKSPACE, CR, CTRL_LETTER_END, CTRL_LETTER_START, DEL, ESC, LF, LOWER_END, LOWER_START,
    META_PREFIX, NUL, SPACE, SYMBOL_END, SYMBOL_START, TAB, UPPER_END, UPPER_START,
};
use crate::decode::Parsed;
use crate::event::{Key, KeyEvent, Modifiers};

/// Decode one legacy key or UTF-8 character from the front of `buf`.
pub(crate) fn parse(buf: &[u8]) -> Parsed {
    let mut modifiers = Modifiers::empty();
    let mut pos = 0;

    if buf.starts_with(&META_PREFIX) {
        modifiers |= Modifiers::META;
        pos += META_PREFIX.len();
    }

    // ESC counts as Alt only when something follows it.
    if buf.get(pos) == Some(&ESC) && buf.len() - pos > 1 {
        modifiers |= Modifiers::ALT;
        pos += 1;
    }

    let Some(&byte) = buf.get(pos) else {
        return Parsed::Incomplete;
    };

    let (key, extra) = match byte {
        SYMBOL_START..=SYMBOL_END | LOWER_START..=LOWER_END => {
            (Key::Char(char::from(byte)), Modifiers::empty())
        }
        UPPER_START..=UPPER_END => (Key::Char(char::from(byte)), Modifiers::SHIFT),
        NUL => (Key::Space, Modifiers::CTRL),
        SPACE => (Key::Space, Modifiers::empty()),
        LF => (Key::Char('j'), Modifiers::CTRL),
        CR => (Key::Return, Modifiers::empty()),
        ESC => (Key::Escape, Modifiers::empty()),
        BACKSPACE | DEL => (Key::Backspace, Modifiers::empty()),
        TAB => (Key::Tab, Modifiers::empty()),
        CTRL_LETTER_START..=CTRL_LETTER_END => {
            (Key::Char(char::from(byte + b'a' - 1)), Modifiers::CTRL)
        }
        _ => return parse_utf8(buf, pos, modifiers),
    };

    Parsed::Event(KeyEvent::with(key, modifiers | extra), pos + 1)
}

// ── UTF-8 ──────────────────────────────────────────────────────────────────

/// Decode the UTF-8 character whose lead byte is `buf[start]`.
fn parse_utf8(buf: &[u8], start: usize, modifiers: Modifiers) -> Parsed {
    let len = utf8_len(buf[start]);
    let Some(bytes) = buf.get(start..start + len) else {
        return Parsed::Incomplete;
    };

    // A stray continuation byte or a malformed sequence decodes to nothing.
    let Some(ch) = std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.chars().next())
    else {
        return Parsed::Unrecognized;
    };

    let modifiers = if looks_uppercase(ch) {
        modifiers | Modifiers::SHIFT
    } else {
        modifiers
    };

    Parsed::Event(KeyEvent::with(Key::Char(ch), modifiers), start + len)
}

/// Sequence length implied by the high bits of a lead byte.
///
/// Continuation bytes (`10xxxxxx`) report 1 and then fail to decode.
const fn utf8_len(lead: u8) -> usize {
    if lead & 0xF0 == 0xF0 {
        4
    } else if lead & 0xE0 == 0xE0 {
        3
    } else if lead & 0xC0 == 0xC0 {
        2
    } else {
        1
    }
}

/// Shift heuristic for non-ASCII characters.
///
/// A character counts as shifted when it has distinct upper and lower
/// forms and is already in the upper one. This is an approximation, not
/// a Unicode case classification: titlecase letters, characters whose
/// uppercase expands to several chars (`ß`), and scripts without case
/// all come out unshifted.
fn looks_uppercase(ch: char) -> bool {
    let has_case = !ch.to_uppercase().eq(ch.to_lowercase());
    has_case && ch.to_uppercase().eq(std::iter::once(ch))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn event(key: Key, modifiers: Modifiers, len: usize) -> Parsed {
        Parsed::Event(KeyEvent::with(key, modifiers), len)
    }

    // ── ASCII ───────────────────────────────────────────────────────────

    #[test]
    fn lowercase_letter() {
        assert_eq!(parse(b"a"), event(Key::Char('a'), Modifiers::empty(), 1));
    }

    #[test]
    fn uppercase_letter_is_shifted() {
        assert_eq!(parse(b"Q"), event(Key::Char('Q'), Modifiers::SHIFT, 1));
    }

    #[test]
    fn symbols_are_unshifted() {
        for &b in b"!@[~`_{|}0" {
            assert_eq!(
                parse(&[b]),
                event(Key::Char(char::from(b)), Modifiers::empty(), 1),
                "byte {b:#04x}"
            );
        }
    }

    #[test]
    fn only_first_key_is_consumed() {
        assert_eq!(parse(b"ab"), event(Key::Char('a'), Modifiers::empty(), 1));
    }

    // ── Control codes ───────────────────────────────────────────────────

    #[test]
    fn nul_is_ctrl_space() {
        assert_eq!(parse(&[NUL]), event(Key::Space, Modifiers::CTRL, 1));
    }

    #[test]
    fn space() {
        assert_eq!(parse(b" "), event(Key::Space, Modifiers::empty(), 1));
    }

    #[test]
    fn line_feed_is_ctrl_j() {
        assert_eq!(parse(b"\n"), event(Key::Char('j'), Modifiers::CTRL, 1));
    }

    #[test]
    fn carriage_return() {
        assert_eq!(parse(b"\r"), event(Key::Return, Modifiers::empty(), 1));
    }

    #[test]
    fn tab_wins_over_ctrl_i() {
        assert_eq!(parse(b"\t"), event(Key::Tab, Modifiers::empty(), 1));
    }

    #[test]
    fn both_backspace_bytes() {
        assert_eq!(parse(&[BACKSPACE]), event(Key::Backspace, Modifiers::empty(), 1));
        assert_eq!(parse(&[DEL]), event(Key::Backspace, Modifiers::empty(), 1));
    }

    #[test]
    fn ctrl_letters() {
        assert_eq!(parse(&[0x01]), event(Key::Char('a'), Modifiers::CTRL, 1));
        assert_eq!(parse(&[0x03]), event(Key::Char('c'), Modifiers::CTRL, 1));
        assert_eq!(parse(&[0x1A]), event(Key::Char('z'), Modifiers::CTRL, 1));
    }

    #[test]
    fn lone_escape() {
        assert_eq!(parse(&[ESC]), event(Key::Escape, Modifiers::empty(), 1));
    }

    // ── Alt / Meta prefixes ─────────────────────────────────────────────

    #[test]
    fn alt_letter() {
        assert_eq!(parse(b"\x1bx"), event(Key::Char('x'), Modifiers::ALT, 2));
    }

    #[test]
    fn alt_escape() {
        assert_eq!(parse(b"\x1b\x1b"), event(Key::Escape, Modifiers::ALT, 2));
    }

    #[test]
    fn alt_ctrl_letter() {
        assert_eq!(
            parse(b"\x1b\x01"),
            event(Key::Char('a'), Modifiers::ALT | Modifiers::CTRL, 2)
        );
    }

    #[test]
    fn meta_prefix() {
        assert_eq!(
            parse(b"\x18@sk"),
            event(Key::Char('k'), Modifiers::META, 4)
        );
    }

    #[test]
    fn meta_and_alt_prefixes() {
        assert_eq!(
            parse(b"\x18@s\x1bK"),
            event(
                Key::Char('K'),
                Modifiers::META | Modifiers::ALT | Modifiers::SHIFT,
                5
            )
        );
    }

    #[test]
    fn meta_prefix_without_key_is_incomplete() {
        assert_eq!(parse(b"\x18@s"), Parsed::Incomplete);
    }

    #[test]
    fn partial_meta_prefix_is_ctrl_x() {
        assert_eq!(parse(b"\x18@"), event(Key::Char('x'), Modifiers::CTRL, 1));
    }

    #[test]
    fn meta_prefix_then_lone_escape() {
        assert_eq!(
            parse(b"\x18@s\x1b"),
            event(Key::Escape, Modifiers::META, 4)
        );
    }

    // ── UTF-8 ───────────────────────────────────────────────────────────

    #[test]
    fn two_byte_lowercase() {
        assert_eq!(
            parse("é".as_bytes()),
            event(Key::Char('é'), Modifiers::empty(), 2)
        );
    }

    #[test]
    fn two_byte_uppercase_is_shifted() {
        assert_eq!(
            parse("Ж".as_bytes()),
            event(Key::Char('Ж'), Modifiers::SHIFT, 2)
        );
    }

    #[test]
    fn three_byte_ideograph() {
        assert_eq!(
            parse("中".as_bytes()),
            event(Key::Char('中'), Modifiers::empty(), 3)
        );
    }

    #[test]
    fn four_byte_emoji() {
        assert_eq!(
            parse("🦀".as_bytes()),
            event(Key::Char('🦀'), Modifiers::empty(), 4)
        );
    }

    #[test]
    fn alt_utf8() {
        let mut buf = vec![ESC];
        buf.extend_from_slice("ñ".as_bytes());
        assert_eq!(parse(&buf), event(Key::Char('ñ'), Modifiers::ALT, 3));
    }

    #[test]
    fn truncated_utf8_is_incomplete() {
        let bytes = "🦀".as_bytes();
        for cut in 1..bytes.len() {
            assert_eq!(parse(&bytes[..cut]), Parsed::Incomplete, "cut at {cut}");
        }
    }

    #[test]
    fn stray_continuation_byte_is_unrecognized() {
        assert_eq!(parse(&[0x80]), Parsed::Unrecognized);
    }

    #[test]
    fn bad_continuation_is_unrecognized() {
        assert_eq!(parse(&[0xC3, b'a']), Parsed::Unrecognized);
    }

    #[test]
    fn utf8_lengths() {
        assert_eq!(utf8_len(0xC3), 2);
        assert_eq!(utf8_len(0xE4), 3);
        assert_eq!(utf8_len(0xF0), 4);
        assert_eq!(utf8_len(0xBF), 1);
    }

    #[test]
    fn case_heuristic() {
        assert!(looks_uppercase('É'));
        assert!(!looks_uppercase('é'));
        assert!(!looks_uppercase('中'));
        assert!(!looks_uppercase('ß'));
        assert!(!looks_uppercase('€'));
    }
}
