// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Discovery of launchable application images.

#[cfg(any(test, feature = "std"))]
use std::{borrow::ToOwned, collections::BTreeMap, format, string::String, vec::Vec};

#[cfg(not(any(test, feature = "std")))]
use alloc::{borrow::ToOwned, collections::BTreeMap, format, string::String, vec::Vec};

use ember_hal::{Filesystem, RemovableStorage};

/// Scan root on flash.
pub const FLASH_APPS_DIR: &str = "/apps";

/// Scan root on the removable card, only visited when the card mounts.
pub const REMOVABLE_APPS_DIR: &str = "/sd/apps";

/// Image behind the synthetic `Settings` entry.
pub const SETTINGS_TARGET: &str = ".frozen/launcher/settings.py";

/// Synthetic entry: rescan the roots in place.
pub const RELOAD_ENTRY: &str = "Reload Apps";

/// Synthetic entry: toggle UI sound.
pub const SOUND_ENTRY: &str = "UI Sound";

/// Synthetic entry: open the settings app.
pub const SETTINGS_ENTRY: &str = "Settings";

/// The menu's list of launchable entries.
///
/// Rebuilt wholesale by [`AppRegistry::scan`], never patched in place.
/// Entry names are the file stems; when both roots carry the same stem
/// the root scanned later wins, so a card app shadows its flash twin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRegistry {
    names: Vec<String>,
    paths: BTreeMap<String, String>,
}

impl AppRegistry {
    /// Scan both roots and build a fresh registry.
    ///
    /// Missing roots are created rather than skipped so a fresh device
    /// has somewhere to put apps. A failed card mount just means no
    /// removable entries this pass.
    pub fn scan<F: Filesystem, M: RemovableStorage>(fs: &mut F, storage: &mut M) -> Self {
        let mut paths = BTreeMap::new();

        ensure_root(fs, FLASH_APPS_DIR);
        collect(fs, FLASH_APPS_DIR, true, &mut paths);

        if storage.is_mounted() || storage.mount().is_ok() {
            ensure_root(fs, REMOVABLE_APPS_DIR);
            collect(fs, REMOVABLE_APPS_DIR, false, &mut paths);
        }

        let mut names: Vec<String> = paths.keys().cloned().collect();
        names.push(RELOAD_ENTRY.to_owned());
        names.push(SOUND_ENTRY.to_owned());
        names.push(SETTINGS_ENTRY.to_owned());

        paths.insert(SETTINGS_ENTRY.to_owned(), SETTINGS_TARGET.to_owned());

        Self { names, paths }
    }

    /// Entry names in display order: scanned apps sorted, then the
    /// synthetic entries.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of entries, synthetic ones included. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the registry has no entries. Always false after a scan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Image path behind an entry; `None` for the synthetic entries
    /// that never dispatch (`Settings` has a path).
    #[must_use]
    pub fn path_of(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }
}

fn ensure_root<F: Filesystem>(fs: &mut F, dir: &str) {
    if !fs.exists(dir) {
        let _ = fs.mkdir(dir);
    }
}

/// Collect app images from one root into the stem-to-path map.
///
/// Compiled bytecode images only run from flash, so `.mpy` counts only
/// when `allow_bytecode` is set.
fn collect<F: Filesystem>(
    fs: &F,
    dir: &str,
    allow_bytecode: bool,
    paths: &mut BTreeMap<String, String>,
) {
    let Ok(entries) = fs.list_dir(dir) else {
        return;
    };
    for entry in entries {
        if entry.is_dir {
            continue;
        }
        let Some((stem, suffix)) = entry.name.rsplit_once('.') else {
            continue;
        };
        let image = suffix == "py" || (allow_bytecode && suffix == "mpy");
        if !image || stem.is_empty() {
            continue;
        }
        paths.insert(stem.to_owned(), format!("{dir}/{}", entry.name));
    }
}
