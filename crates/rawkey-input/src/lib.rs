// SPDX-License-Identifier: MIT
//
// rawkey-input — raw terminal input decoder for rawkey.
//
// Turns the bytes a terminal sends in raw mode into key events. Covers
// the encodings terminals actually use for keys: single-byte control
// codes, the ESC-prefix Alt convention and the `CAN @ s` Meta prefix,
// SS3 function keys, CSI cursor/editing/function keys, and UTF-8 text.
//
// Two layers:
//
// - `decode` is a pure function from a byte slice to the keys at its
//   front. It keeps no state and never panics on any input.
//   Truncated input is `Incomplete`, garbage is `Unrecognized`.
// - `KeyStream` wraps it for a read loop: it buffers truncated
//   sequences between reads and skips or drops garbage.
//
// Mouse reporting, bracketed paste and keyboard protocol negotiation are
// not decoded.

pub mod ascii;
pub mod decode;
pub mod event;
pub mod modifier;
pub mod stream;

mod csi;
mod legacy;
mod ss3;

pub use decode::{Decoded, HexBytes, Keystroke, decode};
pub use event::{Key, KeyEvent, Modifiers, ParseKeyError};
pub use stream::{KeyStream, Recovery, StreamConfig};
