// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Per-boot mutable state shared by the controllers.

#[cfg(any(test, feature = "std"))]
use std::string::String;

#[cfg(not(any(test, feature = "std")))]
use alloc::string::String;

use crate::config::Config;
use ember_hal::{Filesystem, FsError};

/// A file captured for a later paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clipboard {
    /// Directory the file was copied from.
    pub dir: String,
    /// File name within that directory.
    pub name: String,
}

/// The one record of mutable launcher state.
///
/// Created at startup, carried by reference into the controllers, and
/// destroyed implicitly by the restart that ends every dispatch. There
/// is no module-level state anywhere in the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Loaded settings.
    pub config: Config,
    /// Whether `config` diverged from the persisted document.
    pub modified: bool,
    /// Source of a pending paste, if any.
    pub clipboard: Option<Clipboard>,
}

impl Session {
    /// Start a session by loading the persisted settings.
    pub fn start<F: Filesystem>(fs: &mut F) -> Self {
        Self::with_config(Config::load(fs))
    }

    /// Session around already-loaded settings, not yet modified.
    #[must_use]
    pub const fn with_config(config: Config) -> Self {
        Self {
            config,
            modified: false,
            clipboard: None,
        }
    }

    /// Persist the settings if they changed since load.
    ///
    /// # Errors
    ///
    /// Fails when the changed document cannot be written; the modified
    /// flag stays set so a later flush can retry.
    pub fn flush<F: Filesystem>(&mut self, fs: &mut F) -> Result<(), FsError> {
        if self.modified {
            self.config.save(fs)?;
            self.modified = false;
        }
        Ok(())
    }
}
