// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The set of hardware devices a controller drives.

/// Every hal device the launcher controllers touch, in one place.
///
/// Controllers borrow the board mutably for one key press or one loop
/// pass. Tests build it from the `ember-hal` mocks and inspect the
/// fields afterwards; on the device it is built once from the real
/// drivers at startup.
#[derive(Debug)]
pub struct Board<F, M, S, R, C, B, K, T> {
    /// Filesystem facade over flash and the mounted card.
    pub fs: F,
    /// Removable card slot.
    pub storage: M,
    /// Non-volatile handoff scratch region.
    pub scratch: S,
    /// Reset controller.
    pub reset: R,
    /// Display surface.
    pub screen: C,
    /// UI feedback beeper.
    pub beeper: B,
    /// Keyboard scan driver.
    pub keypad: K,
    /// Millisecond time source.
    pub clock: T,
}
