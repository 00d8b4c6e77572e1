// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Persisted launcher settings.

#[cfg(any(test, feature = "std"))]
use std::string::String;

#[cfg(not(any(test, feature = "std")))]
use alloc::string::String;

use ember_hal::{Filesystem, FsError};
use serde::{Deserialize, Serialize};

/// Where the settings document lives on flash.
pub const CONFIG_PATH: &str = "/config.json";

/// The settings document.
///
/// Unknown fields in the stored JSON are ignored and missing fields take
/// their defaults, so the document survives upgrades in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Foreground and accent color (RGB565).
    pub ui_color: u16,
    /// Background color (RGB565).
    pub bg_color: u16,
    /// Whether UI beeps are played.
    pub ui_sound: bool,
    /// Beeper volume.
    pub volume: u8,
    /// Stored wireless network name.
    pub wifi_ssid: String,
    /// Stored wireless network password.
    pub wifi_pass: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_color: 53243,
            bg_color: 4421,
            ui_sound: true,
            volume: 2,
            wifi_ssid: String::new(),
            wifi_pass: String::new(),
        }
    }
}

impl Config {
    /// Load the settings from [`CONFIG_PATH`].
    ///
    /// A missing or unparseable document resolves to the defaults, which
    /// are written back immediately so the device converges on a valid
    /// document instead of failing the same way every boot.
    pub fn load<F: Filesystem>(fs: &mut F) -> Self {
        if let Ok(bytes) = fs.read(CONFIG_PATH)
            && let Ok(config) = serde_json::from_slice(&bytes)
        {
            return config;
        }
        let config = Self::default();
        let _ = config.save(fs);
        config
    }

    /// Persist the settings to [`CONFIG_PATH`].
    ///
    /// # Errors
    ///
    /// Fails when the document cannot be written.
    pub fn save<F: Filesystem>(&self, fs: &mut F) -> Result<(), FsError> {
        let bytes = serde_json::to_vec(self).map_err(|_error| FsError::Io)?;
        fs.write(CONFIG_PATH, &bytes)
    }
}
