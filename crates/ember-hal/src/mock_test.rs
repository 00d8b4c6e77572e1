// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the mock hardware.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::mock::*;
use super::traits::*;

// =============================================================================
// MockScratch
// =============================================================================

#[test]
fn scratch_starts_empty() {
    let scratch = MockScratch::new();
    let mut buf = [0u8; 16];
    assert_eq!(scratch.read(&mut buf), 0);
}

#[test]
fn scratch_roundtrip() {
    let mut scratch = MockScratch::new();
    scratch.write(b"/apps/game.py").unwrap();

    let mut buf = [0u8; 64];
    let len = scratch.read(&mut buf);
    assert_eq!(&buf[..len], b"/apps/game.py");
    assert_eq!(scratch.writes, 1);
}

#[test]
fn scratch_write_replaces_contents() {
    let mut scratch = MockScratch::with_contents(b"old");
    scratch.write(b"").unwrap();
    assert_eq!(scratch.contents(), b"");
}

#[test]
fn scratch_rejects_oversized_write() {
    let mut scratch = MockScratch::new();
    let big = vec![b'x'; scratch.capacity() + 1];
    assert_eq!(
        scratch.write(&big),
        Err(ScratchError::TooLarge { capacity: 2048 })
    );
}

#[test]
fn scratch_read_truncates_to_buffer() {
    let scratch = MockScratch::with_contents(b"abcdef");
    let mut buf = [0u8; 3];
    assert_eq!(scratch.read(&mut buf), 3);
    assert_eq!(&buf, b"abc");
}

// =============================================================================
// MockReset / MockStorage
// =============================================================================

#[test]
fn reset_records_restarts() {
    let mut reset = MockReset::with_cause(ResetCause::PowerOn);
    assert_eq!(reset.cause(), ResetCause::PowerOn);
    reset.restart();
    reset.restart();
    assert_eq!(reset.restarts, 2);
}

#[test]
fn storage_mounts_once() {
    let mut storage = MockStorage::new();
    assert!(!storage.is_mounted());
    storage.mount().unwrap();
    assert!(storage.is_mounted());
}

#[test]
fn failing_storage_stays_unmounted() {
    let mut storage = MockStorage::failing(MountError::NoCard);
    assert_eq!(storage.mount(), Err(MountError::NoCard));
    assert!(!storage.is_mounted());
    assert_eq!(storage.mount_attempts, 1);
}

// =============================================================================
// MockFilesystem
// =============================================================================

#[test]
fn filesystem_root_always_exists() {
    let fs = MockFilesystem::new();
    assert!(fs.exists("/"));
    assert_eq!(fs.list_dir("/").unwrap(), vec![]);
}

#[test]
fn filesystem_lists_direct_children_only() {
    let mut fs = MockFilesystem::new();
    fs.add_file("/apps/game.py", b"");
    fs.add_file("/apps/tools/deep.py", b"");

    let entries = fs.list_dir("/apps").unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["game.py", "tools"]);
    assert!(!entries[0].is_dir);
    assert!(entries[1].is_dir);
}

#[test]
fn filesystem_list_missing_dir_fails() {
    let fs = MockFilesystem::new();
    assert_eq!(fs.list_dir("/nope"), Err(FsError::NotFound));
}

#[test]
fn filesystem_list_file_fails() {
    let mut fs = MockFilesystem::new();
    fs.add_file("/a.txt", b"x");
    assert_eq!(fs.list_dir("/a.txt"), Err(FsError::NotADirectory));
}

#[test]
fn filesystem_write_requires_parent() {
    let mut fs = MockFilesystem::new();
    assert_eq!(fs.write("/missing/file.txt", b"x"), Err(FsError::NotFound));
}

#[test]
fn filesystem_append_creates_and_extends() {
    let mut fs = MockFilesystem::new();
    fs.append("/log.txt", b"one\n").unwrap();
    fs.append("/log.txt", b"two\n").unwrap();
    assert_eq!(fs.read("/log.txt").unwrap(), b"one\ntwo\n");
}

#[test]
fn filesystem_mkdir_rejects_duplicates() {
    let mut fs = MockFilesystem::new();
    fs.mkdir("/apps").unwrap();
    assert_eq!(fs.mkdir("/apps"), Err(FsError::AlreadyExists));
}

#[test]
fn filesystem_remove_file_only() {
    let mut fs = MockFilesystem::new();
    fs.add_dir("/apps");
    fs.add_file("/a.txt", b"x");
    assert_eq!(fs.remove("/apps"), Err(FsError::IsADirectory));
    fs.remove("/a.txt").unwrap();
    assert!(!fs.exists("/a.txt"));
}

#[test]
fn filesystem_rename_moves_contents() {
    let mut fs = MockFilesystem::new();
    fs.add_file("/old.txt", b"data");
    fs.rename("/old.txt", "/new.txt").unwrap();
    assert!(!fs.exists("/old.txt"));
    assert_eq!(fs.read("/new.txt").unwrap(), b"data");
}

#[test]
fn filesystem_rename_rejects_existing_destination() {
    let mut fs = MockFilesystem::new();
    fs.add_file("/a.txt", b"a");
    fs.add_file("/b.txt", b"b");
    assert_eq!(fs.rename("/a.txt", "/b.txt"), Err(FsError::AlreadyExists));
    assert_eq!(fs.read("/a.txt").unwrap(), b"a");
}

#[test]
fn filesystem_normalizes_double_slashes() {
    let mut fs = MockFilesystem::new();
    fs.add_file("/sd//notes.txt", b"n");
    assert!(fs.exists("/sd/notes.txt"));
}

// =============================================================================
// MockImageLoader
// =============================================================================

#[test]
fn loader_loads_registered_images() {
    let mut loader = MockImageLoader::new();
    loader.add_image("/apps/game.py");
    loader.load("/apps/game.py").unwrap();
    assert_eq!(loader.running.as_deref(), Some("/apps/game.py"));
}

#[test]
fn loader_distinguishes_missing_from_broken() {
    let mut loader = MockImageLoader::new();
    loader.add_broken_image("/apps/broken.py");
    assert_eq!(loader.load("/apps/missing.py"), Err(LoadError::NotFound));
    assert_eq!(loader.load("/apps/broken.py"), Err(LoadError::Failed));
    assert_eq!(loader.attempts, vec!["/apps/missing.py", "/apps/broken.py"]);
}

// =============================================================================
// MockKeypad / MockJournal
// =============================================================================

#[test]
fn keypad_replays_polls_in_order() {
    let mut keypad = MockKeypad::new();
    keypad.push_poll(&[Key::Right]);
    keypad.push_poll(&[]);
    keypad.push_poll(&[Key::Select]);

    assert_eq!(keypad.new_keys(), vec![Key::Right]);
    assert_eq!(keypad.new_keys(), vec![]);
    assert_eq!(keypad.new_keys(), vec![Key::Select]);
    assert!(keypad.exhausted());
    assert_eq!(keypad.new_keys(), vec![]);
}

#[test]
fn journal_failure_injection() {
    let mut journal = MockJournal::new();
    journal.append("first").unwrap();
    journal.fail = true;
    assert_eq!(journal.append("second"), Err(JournalError::WriteFailed));
    assert_eq!(journal.lines, vec!["first"]);
}
