// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Launcher core for Ember.
//!
//! Everything that runs between two restarts: the app registry, the
//! persisted settings, the per-boot session, and the two dispatch
//! controllers (menu and file browser) that end their lives by writing
//! a handoff message and restarting the device.
//!
//! All hardware access goes through the [`ember_hal`] traits, bundled
//! into a [`Board`], so the whole crate runs on the host against mocks.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod board;
mod browser;
mod config;
mod dispatch;
mod handlers;
mod menu;
mod registry;
mod session;
mod view;

#[cfg(test)]
mod menu_test;
#[cfg(test)]
mod registry_test;
#[cfg(test)]
mod session_test;

pub use board::Board;
pub use browser::{
    ACTIONS_ENTRY, BROWSER_POLL_SLEEP_MS, Browser, BrowserEvent, BrowserRow, PASTE_CHUNK_LEN,
};
pub use config::{CONFIG_PATH, Config};
pub use handlers::{DEFAULT_HANDLER, HandlerTable};
pub use menu::{
    DISPATCH_NOTES, MENU_POLL_SLEEP_MS, MOVE_NOTES, Menu, MenuEvent, STARTUP_NOTES, UNMUTE_NOTES,
};
pub use registry::{
    AppRegistry, FLASH_APPS_DIR, RELOAD_ENTRY, REMOVABLE_APPS_DIR, SETTINGS_ENTRY, SETTINGS_TARGET,
    SOUND_ENTRY,
};
pub use session::{Clipboard, Session};
pub use view::{ITEMS_PER_SCREEN, ListCursor};
