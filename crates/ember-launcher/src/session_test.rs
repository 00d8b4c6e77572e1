// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the per-boot session record.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::config::{CONFIG_PATH, Config};
use super::session::*;
use ember_hal::{Filesystem, MockFilesystem};

#[test]
fn start_loads_the_persisted_settings() {
    let mut fs = MockFilesystem::new();
    let stored = Config {
        volume: 8,
        ..Config::default()
    };
    stored.save(&mut fs).unwrap();

    let session = Session::start(&mut fs);
    assert_eq!(session.config, stored);
    assert!(!session.modified);
    assert_eq!(session.clipboard, None);
}

#[test]
fn flush_is_a_no_op_when_unmodified() {
    let mut fs = MockFilesystem::new();
    let mut session = Session::with_config(Config::default());

    session.flush(&mut fs).unwrap();
    assert!(!fs.exists(CONFIG_PATH));
}

#[test]
fn flush_persists_changes_and_clears_the_flag() {
    let mut fs = MockFilesystem::new();
    let mut session = Session::with_config(Config::default());
    session.config.ui_sound = false;
    session.modified = true;

    session.flush(&mut fs).unwrap();
    assert!(!session.modified);

    let bytes = fs.read(CONFIG_PATH).unwrap();
    let stored: Config = serde_json::from_slice(&bytes).unwrap();
    assert!(!stored.ui_sound);
}
