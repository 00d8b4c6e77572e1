// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hardware abstraction for Ember.
//!
//! Ember runs on a microcontroller with no operating system; exactly one
//! application image owns the processor at a time. Everything the handoff
//! core needs from the hardware is expressed here as a trait, so the boot
//! dispatcher and the dispatch controllers can be tested on the host
//! against mock implementations.
//!
//! # Modules
//!
//! - [`traits`]: the hardware contracts (scratch store, reset control,
//!   storage, image loader, screen, keypad, beeper, clock, journal)
//! - [`mock`]: recording mock implementations for host tests

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// Mocks require alloc collections, only available with std or test
#[cfg(any(test, feature = "std"))]
pub mod mock;
pub mod traits;

#[cfg(test)]
mod mock_test;


#[cfg(any(test, feature = "std"))]
pub use mock::{
    MockBeeper, MockClock, MockFilesystem, MockImageLoader, MockJournal, MockKeypad, MockReset,
    MockScratch, MockScreen, MockStorage,
};
pub use traits::{
    Beeper, Clock, DirEntry, Filesystem, FsError, ImageLoader, Journal, JournalError, Key, Keypad,
    LoadError, MountError, RemovableStorage, ResetCause, ResetControl, ScratchError, ScratchStore,
    Screen,
};
