// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Writing the handoff message just before a restart.

use ember_hal::ScratchStore;
use ember_handoff as handoff;

// Matches the scratch region capacity; a message can never be larger.
const MESSAGE_LEN: usize = 2048;

/// Encode and write one handoff message.
///
/// Failures are swallowed: the boot dispatcher turns a missing or stale
/// message into the launcher anyway, which is the safest thing a failed
/// dispatch can become.
pub(crate) fn write_handoff<S: ScratchStore>(
    scratch: &mut S,
    target: &str,
    payload: Option<&str>,
) {
    let mut buf = [0u8; MESSAGE_LEN];
    if let Ok(len) = handoff::encode(target, payload, &mut buf) {
        let _ = scratch.write(&buf[..len]);
    }
}

/// Clear the store so the next boot sees the no-handoff sentinel and
/// reopens the launcher.
pub(crate) fn write_exit<S: ScratchStore>(scratch: &mut S) {
    let _ = scratch.write(&[]);
}
