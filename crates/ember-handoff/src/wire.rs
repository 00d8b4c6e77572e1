// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Encoding and decoding of the scratch store byte format.

/// Reserved separator between target and payload.
///
/// Multi-character on purpose: `/` is common in paths, `|` alone could
/// plausibly appear in a payload, but the full sequence `|//|` is reserved
/// and rejected in targets at encode time.
pub const DELIMITER: &str = "|//|";

/// A decoded handoff message, borrowing from the scratch buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message<'a> {
    /// Path of the image to load after the next restart.
    pub target: &'a str,
    /// Optional opaque data for the target image (e.g. a file path).
    pub payload: Option<&'a str>,
}

impl<'a> Message<'a> {
    /// Create a message with no payload.
    #[must_use]
    pub const fn target_only(target: &'a str) -> Self {
        Self {
            target,
            payload: None,
        }
    }

    /// The same message with the payload removed.
    ///
    /// The boot dispatcher rewrites the scratch store with this form so
    /// repeated restarts reopen the target without replaying the payload.
    #[must_use]
    pub const fn stripped(&self) -> Self {
        Self {
            target: self.target,
            payload: None,
        }
    }
}

/// Errors raised when encoding a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The target was empty; an empty scratch store means "no handoff"
    /// and must not be producible through the codec.
    EmptyTarget,
    /// The target contained the reserved delimiter sequence.
    TargetContainsDelimiter,
    /// The output buffer cannot hold the encoded message.
    BufferTooSmall {
        /// Bytes the encoded message would occupy.
        needed: usize,
    },
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyTarget => write!(f, "handoff target is empty"),
            Self::TargetContainsDelimiter => {
                write!(f, "handoff target contains the reserved delimiter")
            }
            Self::BufferTooSmall { needed } => {
                write!(f, "scratch buffer too small for {needed} byte message")
            }
        }
    }
}

/// Errors raised when decoding scratch store contents.
///
/// Scratch contents survived a restart and are untrusted; a message that
/// fails to decode is treated by the boot dispatcher like no message at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer is not valid UTF-8.
    InvalidUtf8,
    /// The buffer starts with the delimiter, leaving an empty target.
    EmptyTarget,
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidUtf8 => write!(f, "scratch contents are not valid UTF-8"),
            Self::EmptyTarget => write!(f, "scratch contents have an empty target"),
        }
    }
}

/// Number of bytes [`encode`] will write for this message.
#[must_use]
pub const fn encoded_len(target: &str, payload: Option<&str>) -> usize {
    match payload {
        Some(p) => target.len() + DELIMITER.len() + p.len(),
        None => target.len(),
    }
}

/// Encode a message into `buf`, returning the number of bytes written.
///
/// # Errors
///
/// Fails when the target is empty, contains the delimiter, or when `buf`
/// cannot hold the encoded form. The payload is never validated: it may
/// contain path separators and even the delimiter itself, because decoding
/// splits on the *first* delimiter occurrence only.
pub fn encode(target: &str, payload: Option<&str>, buf: &mut [u8]) -> Result<usize, EncodeError> {
    if target.is_empty() {
        return Err(EncodeError::EmptyTarget);
    }
    if target.contains(DELIMITER) {
        return Err(EncodeError::TargetContainsDelimiter);
    }

    let needed = encoded_len(target, payload);
    if buf.len() < needed {
        return Err(EncodeError::BufferTooSmall { needed });
    }

    buf[..target.len()].copy_from_slice(target.as_bytes());
    if let Some(payload) = payload {
        let delim_end = target.len() + DELIMITER.len();
        buf[target.len()..delim_end].copy_from_slice(DELIMITER.as_bytes());
        buf[delim_end..needed].copy_from_slice(payload.as_bytes());
    }

    Ok(needed)
}

/// Decode scratch store contents.
///
/// An empty buffer decodes to `Ok(None)`: "no handoff", which callers must
/// treat the same as a missing message. This is distinct from a
/// present-but-empty target, which is a [`DecodeError`].
///
/// # Errors
///
/// Fails on invalid UTF-8 or an empty target before the delimiter.
pub fn decode(buf: &[u8]) -> Result<Option<Message<'_>>, DecodeError> {
    if buf.is_empty() {
        return Ok(None);
    }

    let text = core::str::from_utf8(buf).map_err(|_| DecodeError::InvalidUtf8)?;

    // Split on the first occurrence only - the payload may contain
    // anything, including further delimiter sequences.
    let message = match text.find(DELIMITER) {
        Some(pos) => Message {
            target: &text[..pos],
            payload: Some(&text[pos + DELIMITER.len()..]),
        },
        None => Message {
            target: text,
            payload: None,
        },
    };

    if message.target.is_empty() {
        return Err(DecodeError::EmptyTarget);
    }

    Ok(Some(message))
}
