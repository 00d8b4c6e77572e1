// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Boot dispatcher for Ember.
//!
//! Runs exactly once per restart, before any application logic. The
//! dispatcher reads the handoff message from the non-volatile scratch
//! store, decides which application image owns the processor next, and
//! recovers to the launcher when that image cannot be loaded. A corrupt
//! or missing message must never leave the device unbootable.
//!
//! The pass is a straight-line state machine with two terminal states:
//! running the resolved image, or halted with a visible error after the
//! fallback itself failed. There is no retry loop - deliberately, so a
//! persistently broken image cannot drain the battery through endless
//! restarts.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod dispatcher;


pub use dispatcher::{BootDecision, BootOutcome, DEFAULT_TARGET, REMOVABLE_PREFIX, dispatch};
