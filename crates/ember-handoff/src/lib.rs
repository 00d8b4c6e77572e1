// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Handoff wire codec for Ember.
//!
//! A running application image requests that a *different* image be loaded
//! after the next restart by writing a single message into the non-volatile
//! scratch store. This crate defines that message and its byte format:
//!
//! ```text
//! TARGET                  no payload
//! TARGET|//|PAYLOAD       with payload
//! ```
//!
//! The delimiter `|//|` never appears in a legitimate image path, so the
//! split is unambiguous. The codec is pure framing: it attaches no meaning
//! to `target` or `payload`.
//!
//! # Design Principles
//!
//! - **No dependencies**: operates on caller-supplied byte slices
//! - **Zero allocation**: decoding borrows from the input buffer
//! - **Defensive**: scratch contents are untrusted input after a restart
//!   and are validated on every decode

#![cfg_attr(not(test), no_std)]

mod wire;


pub use wire::{DELIMITER, DecodeError, EncodeError, Message, decode, encode, encoded_len};
