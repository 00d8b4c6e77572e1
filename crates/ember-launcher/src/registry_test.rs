// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the app registry scan.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::registry::*;
use ember_hal::{Filesystem, MockFilesystem, MockStorage, MountError};

fn names(registry: &AppRegistry) -> Vec<&str> {
    registry.names().iter().map(String::as_str).collect()
}

// =============================================================================
// Scanning
// =============================================================================

#[test]
fn scan_creates_missing_roots() {
    let mut fs = MockFilesystem::new();
    fs.add_dir("/sd");
    let mut storage = MockStorage::new();

    AppRegistry::scan(&mut fs, &mut storage);
    assert!(fs.exists(FLASH_APPS_DIR));
    assert!(fs.exists(REMOVABLE_APPS_DIR));
}

#[test]
fn scan_collects_flash_images_sorted_with_synthetic_tail() {
    let mut fs = MockFilesystem::new();
    fs.add_file("/apps/zebra.py", b"");
    fs.add_file("/apps/alpha.py", b"");
    fs.add_file("/apps/frozen.mpy", b"");
    let mut storage = MockStorage::failing(MountError::NoCard);

    let registry = AppRegistry::scan(&mut fs, &mut storage);
    assert_eq!(
        names(&registry),
        vec![
            "alpha",
            "frozen",
            "zebra",
            RELOAD_ENTRY,
            SOUND_ENTRY,
            SETTINGS_ENTRY
        ]
    );
    assert_eq!(registry.path_of("zebra"), Some("/apps/zebra.py"));
    assert_eq!(registry.path_of("frozen"), Some("/apps/frozen.mpy"));
}

#[test]
fn scan_ignores_directories_and_foreign_suffixes() {
    let mut fs = MockFilesystem::new();
    fs.add_dir("/apps/assets");
    fs.add_file("/apps/readme.txt", b"");
    fs.add_file("/apps/noext", b"");
    fs.add_file("/apps/.py", b"");
    let mut storage = MockStorage::failing(MountError::NoCard);

    let registry = AppRegistry::scan(&mut fs, &mut storage);
    assert_eq!(
        names(&registry),
        vec![RELOAD_ENTRY, SOUND_ENTRY, SETTINGS_ENTRY]
    );
}

#[test]
fn bytecode_images_only_count_on_flash() {
    let mut fs = MockFilesystem::new();
    fs.add_dir("/apps");
    fs.add_file("/sd/apps/compiled.mpy", b"");
    let mut storage = MockStorage::new();

    let registry = AppRegistry::scan(&mut fs, &mut storage);
    assert_eq!(registry.path_of("compiled"), None);
}

// =============================================================================
// Duplicate names across roots
// =============================================================================

#[test]
fn card_app_shadows_flash_twin() {
    let mut fs = MockFilesystem::new();
    fs.add_file("/apps/game.py", b"");
    fs.add_file("/sd/apps/game.py", b"");
    let mut storage = MockStorage::new();

    let registry = AppRegistry::scan(&mut fs, &mut storage);
    let game_count = names(&registry).iter().filter(|n| **n == "game").count();
    assert_eq!(game_count, 1);
    assert_eq!(registry.path_of("game"), Some("/sd/apps/game.py"));
}

#[test]
fn mount_failure_scans_flash_only() {
    let mut fs = MockFilesystem::new();
    fs.add_file("/apps/game.py", b"");
    fs.add_file("/sd/apps/card_only.py", b"");
    let mut storage = MockStorage::failing(MountError::IoFailed);

    let registry = AppRegistry::scan(&mut fs, &mut storage);
    assert_eq!(registry.path_of("game"), Some("/apps/game.py"));
    assert_eq!(registry.path_of("card_only"), None);
}

// =============================================================================
// Synthetic entries
// =============================================================================

#[test]
fn settings_entry_has_a_fixed_path() {
    let mut fs = MockFilesystem::new();
    let mut storage = MockStorage::failing(MountError::NoCard);

    let registry = AppRegistry::scan(&mut fs, &mut storage);
    assert_eq!(registry.path_of(SETTINGS_ENTRY), Some(SETTINGS_TARGET));
    assert_eq!(registry.path_of(RELOAD_ENTRY), None);
    assert_eq!(registry.path_of(SOUND_ENTRY), None);
    assert!(!registry.is_empty());
    assert_eq!(registry.len(), 3);
}
