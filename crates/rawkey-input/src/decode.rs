// SPDX-License-Identifier: MIT
//
// Decoder entry point.
//
// `decode` routes the front of a buffer to the CSI, SS3 or legacy
// decoder, then keeps going over whatever the first key didn't consume,
// because terminals deliver fast typing and pastes as one chunk. The
// walk stops at the end of the buffer or at the first tail that doesn't
// decode; an undecodable tail is left for the caller (it is usually the
// start of a sequence whose remaining bytes are still in flight).
//
// The walk is a loop over offsets into the borrowed buffer. Nothing is
// copied and nothing is retained between calls.

use std::fmt;

use log::{debug, trace};

use crate::ascii::{CSI_INTRO, ESC, SS3_INTRO};
use crate::event::KeyEvent;
use crate::{csi, legacy, ss3};

// ─── Results ────────────────────────────────────────────────────────────────

/// Outcome of decoding a single key at the front of a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parsed {
    /// A key and the number of bytes it consumed.
    Event(KeyEvent, usize),
    /// The bytes so far are a valid prefix; more are needed.
    Incomplete,
    /// The bytes match no known sequence.
    Unrecognized,
}

/// A decoded key together with the number of input bytes it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub event: KeyEvent,
    /// Bytes of input this event accounts for.
    pub len: usize,
}

/// Result of [`decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// Not enough bytes to tell what the sequence is. Append more input
    /// and decode again.
    Incomplete,
    /// The bytes form no known sequence. Retrying with more input will
    /// not help.
    Unrecognized,
    /// One or more keys in arrival order. Never empty.
    Events(Vec<Keystroke>),
}

impl Decoded {
    /// Bytes consumed by the first event, if any.
    #[must_use]
    pub fn consumed(&self) -> Option<usize> {
        match self {
            Self::Events(strokes) => strokes.first().map(|s| s.len),
            Self::Incomplete | Self::Unrecognized => None,
        }
    }

    /// Bytes consumed by all events together.
    #[must_use]
    pub fn total_consumed(&self) -> usize {
        match self {
            Self::Events(strokes) => strokes.iter().map(|s| s.len).sum(),
            Self::Incomplete | Self::Unrecognized => 0,
        }
    }

    /// The decoded events without their lengths, or `None` if nothing
    /// decoded.
    #[must_use]
    pub fn into_events(self) -> Option<Vec<KeyEvent>> {
        match self {
            Self::Events(strokes) => Some(strokes.into_iter().map(|s| s.event).collect()),
            Self::Incomplete | Self::Unrecognized => None,
        }
    }
}

// ─── Dispatch ───────────────────────────────────────────────────────────────

/// Decode every key at the front of `buf`.
///
/// Returns [`Decoded::Incomplete`] for an empty buffer or a truncated
/// first key, [`Decoded::Unrecognized`] if the first key is garbage, and
/// otherwise every key that decodes back to back from the start. Bytes
/// after the last returned key are not consumed; see
/// [`Decoded::total_consumed`].
///
/// ```
/// use rawkey_input::{decode, Key, KeyEvent, Modifiers};
///
/// let events = decode(b"\x1b[1;5Ax").into_events().unwrap();
/// assert_eq!(
///     events,
///     [
///         KeyEvent::with(Key::Up, Modifiers::CTRL),
///         KeyEvent::plain(Key::Char('x')),
///     ]
/// );
/// ```
#[must_use]
pub fn decode(buf: &[u8]) -> Decoded {
    let mut strokes = Vec::new();
    let mut pos = 0;

    while pos < buf.len() {
        match parse_one(&buf[pos..]) {
            Parsed::Event(event, len) => {
                trace!("decoded {event} from {} byte(s)", len);
                strokes.push(Keystroke { event, len });
                pos += len;
            }
            Parsed::Incomplete if strokes.is_empty() => return Decoded::Incomplete,
            Parsed::Unrecognized if strokes.is_empty() => {
                debug!("unrecognized input: {}", HexBytes(buf));
                return Decoded::Unrecognized;
            }
            Parsed::Incomplete | Parsed::Unrecognized => {
                trace!("leaving {} undecoded byte(s)", buf.len() - pos);
                break;
            }
        }
    }

    if strokes.is_empty() {
        Decoded::Incomplete
    } else {
        Decoded::Events(strokes)
    }
}

/// Route one key at the front of `buf` to its decoder.
fn parse_one(buf: &[u8]) -> Parsed {
    match buf {
        [] => Parsed::Incomplete,
        [ESC, CSI_INTRO, ..] => csi::parse(buf),
        [ESC, SS3_INTRO, ..] => ss3::parse(buf),
        _ => legacy::parse(buf),
    }
}

// ─── Hex formatting ─────────────────────────────────────────────────────────

/// Displays bytes as space-separated lowercase hex, e.g. `1b 5b 41`.
#[derive(Debug, Clone, Copy)]
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
