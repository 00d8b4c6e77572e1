// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The single boot pass: read the handoff, resolve a target, load it.

#[cfg(any(test, feature = "std"))]
use std::{borrow::ToOwned, format, string::String};

#[cfg(not(any(test, feature = "std")))]
use alloc::{borrow::ToOwned, format, string::String};

use ember_hal::{
    ImageLoader, Journal, LoadError, RemovableStorage, ResetCause, ResetControl, ScratchStore,
    Screen,
};
use ember_handoff as handoff;

/// The known-good image loaded by default and on fallback.
pub const DEFAULT_TARGET: &str = ".frozen/launcher/launcher.py";

/// Targets under this prefix live on removable storage and need a mount.
pub const REMOVABLE_PREFIX: &str = "/sd";

/// Upper bound for a scratch message; matches the RTC region capacity.
const MAX_MESSAGE_LEN: usize = 2048;

/// What the dispatcher decided for this restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootDecision {
    /// How the restart was triggered.
    pub cause: ResetCause,
    /// The image path ultimately chosen to load.
    pub resolved_target: String,
    /// Payload forwarded to the resolved target's environment.
    pub carried_payload: Option<String>,
    /// Whether the default was substituted after a load failure.
    pub fallback: bool,
}

/// Terminal state of a boot pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome {
    /// The resolved image now owns the device.
    Running(BootDecision),
    /// Even the default image failed to load; the device halts with a
    /// visible error. There is no second fallback.
    Halted {
        /// The image whose load attempt ended the pass.
        target: String,
        /// Why it failed.
        error: LoadError,
    },
}

/// Run one boot pass.
///
/// This is the only place where state that survived the restart is read
/// back, so the scratch contents are treated as untrusted input: anything
/// that fails to decode resolves to the default target.
pub fn dispatch<S, R, M, L, J, C>(
    scratch: &mut S,
    reset: &R,
    storage: &mut M,
    loader: &mut L,
    journal: &mut J,
    screen: &mut C,
) -> BootOutcome
where
    S: ScratchStore,
    R: ResetControl,
    M: RemovableStorage,
    L: ImageLoader,
    J: Journal,
    C: Screen,
{
    let cause = reset.cause();

    let (target, payload) = if cause == ResetCause::PowerOn {
        // A power cycle wiped the scratch region; whatever reads back is
        // stale. Resolve the launcher and prime the store for next time.
        write_target(scratch, journal, DEFAULT_TARGET);
        (DEFAULT_TARGET.to_owned(), None)
    } else {
        read_message(scratch, journal)
    };

    if target.starts_with(REMOVABLE_PREFIX) && !storage.is_mounted() {
        // Not fatal: the load below fails and falls back if the target
        // really is unreachable.
        if let Err(error) = storage.mount() {
            let _ = journal.append(&format!("couldn't mount removable storage: {error}"));
        }
    }

    match loader.load(&target) {
        Ok(()) => BootOutcome::Running(BootDecision {
            cause,
            resolved_target: target,
            carried_payload: payload,
            fallback: false,
        }),
        Err(error) => {
            let _ = journal.append(&format!("tried to launch '{target}', but failed: {error}"));
            load_fallback(cause, loader, screen)
        }
    }
}

/// Read and decode the scratch store, rewriting it for the next restart.
fn read_message<S: ScratchStore, J: Journal>(
    scratch: &mut S,
    journal: &mut J,
) -> (String, Option<String>) {
    let mut buf = [0u8; MAX_MESSAGE_LEN];
    let len = scratch.read(&mut buf);

    match handoff::decode(&buf[..len]) {
        Ok(Some(message)) => {
            let target = message.target.to_owned();
            let payload = message.payload.map(ToOwned::to_owned);

            if payload.is_some() {
                // Strip the payload before loading anything. If the new
                // image crashes and the watchdog forces another restart,
                // the device reopens the same target without payload
                // instead of replaying the handoff forever.
                write_target(scratch, journal, &target);
            } else {
                // A plain reset from inside the new image returns to the
                // launcher.
                write_target(scratch, journal, DEFAULT_TARGET);
            }

            (target, payload)
        }
        Ok(None) => {
            // Empty store: no handoff was requested.
            write_target(scratch, journal, DEFAULT_TARGET);
            (DEFAULT_TARGET.to_owned(), None)
        }
        Err(error) => {
            let _ = journal.append(&format!("discarding corrupt handoff message: {error}"));
            write_target(scratch, journal, DEFAULT_TARGET);
            (DEFAULT_TARGET.to_owned(), None)
        }
    }
}

/// One fallback attempt, then halt. Never loops.
fn load_fallback<L: ImageLoader, C: Screen>(
    cause: ResetCause,
    loader: &mut L,
    screen: &mut C,
) -> BootOutcome {
    match loader.load(DEFAULT_TARGET) {
        Ok(()) => BootOutcome::Running(BootDecision {
            cause,
            resolved_target: DEFAULT_TARGET.to_owned(),
            carried_payload: None,
            fallback: true,
        }),
        Err(error) => {
            screen.show_message(&format!("launcher failed to load: {error}"));
            BootOutcome::Halted {
                target: DEFAULT_TARGET.to_owned(),
                error,
            }
        }
    }
}

/// Rewrite the scratch store with a bare target, swallowing write errors.
///
/// Both failure modes (encode, store write) leave the previous contents in
/// place; the next boot pass re-validates them anyway.
fn write_target<S: ScratchStore, J: Journal>(scratch: &mut S, journal: &mut J, target: &str) {
    let mut buf = [0u8; MAX_MESSAGE_LEN];
    match handoff::encode(target, None, &mut buf) {
        Ok(len) => {
            if scratch.write(&buf[..len]).is_err() {
                let _ = journal.append("couldn't rewrite scratch store");
            }
        }
        Err(error) => {
            let _ = journal.append(&format!("couldn't re-encode handoff target: {error}"));
        }
    }
}
