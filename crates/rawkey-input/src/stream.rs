// SPDX-License-Identifier: MIT
//
// Incremental decoding across reads.
//
// `decode` is stateless: hand it a buffer, get keys back. A real read
// loop also has to keep the bytes of a half-received sequence until the
// rest arrives, and decide what to do with garbage. `KeyStream` does
// both. Feed it each chunk from `read()`; it returns the keys it could
// decode and holds on to the rest.
//
// Pending bytes are bounded by `StreamConfig::max_pending`, so a stream
// of bytes that never completes a sequence can't grow the buffer
// without limit.

use log::{debug, warn};

use crate::decode::{Decoded, HexBytes, decode};
use crate::event::KeyEvent;

// ─── Config ─────────────────────────────────────────────────────────────────

/// What to do when the front of the pending buffer is unrecognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recovery {
    /// Drop one byte and try again from the next one.
    #[default]
    SkipByte,
    /// Drop everything pending.
    DropChunk,
}

/// Default bound on bytes held for an incomplete sequence.
pub const DEFAULT_MAX_PENDING: usize = 64;

/// Tuning for [`KeyStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    pub recovery: Recovery,
    /// Pending bytes beyond this are discarded.
    pub max_pending: usize,
}

impl StreamConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recovery: Recovery::SkipByte,
            max_pending: DEFAULT_MAX_PENDING,
        }
    }

    #[must_use]
    pub const fn with_recovery(mut self, recovery: Recovery) -> Self {
        self.recovery = recovery;
        self
    }

    #[must_use]
    pub const fn with_max_pending(mut self, max_pending: usize) -> Self {
        self.max_pending = max_pending;
        self
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ─── KeyStream ──────────────────────────────────────────────────────────────

/// Buffered key decoder for a byte stream.
///
/// ```
/// use rawkey_input::{Key, KeyEvent, KeyStream};
///
/// let mut stream = KeyStream::default();
/// assert!(stream.feed(b"\x1b[1").is_empty());
/// assert!(stream.has_pending());
/// assert_eq!(stream.feed(b"5~"), [KeyEvent::plain(Key::F(5))]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyStream {
    config: StreamConfig,
    /// Bytes received but not yet decoded.
    buf: Vec<u8>,
}

impl KeyStream {
    #[must_use]
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            buf: Vec::with_capacity(64),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Append `data` and return every key that can now be decoded.
    pub fn feed(&mut self, data: &[u8]) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        self.feed_with(data, |event, _| events.push(event));
        events
    }

    /// Like [`feed`](Self::feed), but hands each key to `on_key` along
    /// with the raw bytes it was decoded from.
    pub fn feed_with(&mut self, data: &[u8], mut on_key: impl FnMut(KeyEvent, &[u8])) {
        self.buf.extend_from_slice(data);
        let mut pos = 0;

        while pos < self.buf.len() {
            let rest = &self.buf[pos..];
            match decode(rest) {
                Decoded::Events(strokes) => {
                    for stroke in strokes {
                        on_key(stroke.event, &self.buf[pos..pos + stroke.len]);
                        pos += stroke.len;
                    }
                }
                Decoded::Incomplete => {
                    if rest.len() > self.config.max_pending {
                        warn!(
                            "discarding {} pending byte(s) that never completed a key",
                            rest.len()
                        );
                        pos = self.buf.len();
                    }
                    break;
                }
                Decoded::Unrecognized => match self.config.recovery {
                    Recovery::SkipByte => {
                        debug!("skipping unrecognized byte {:#04x}", rest[0]);
                        pos += 1;
                    }
                    Recovery::DropChunk => {
                        debug!("dropping unrecognized input: {}", HexBytes(rest));
                        pos = self.buf.len();
                    }
                },
            }
        }

        self.buf.drain(..pos);
    }

    /// Bytes held back waiting for the rest of a sequence.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buf
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Forget any pending bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
