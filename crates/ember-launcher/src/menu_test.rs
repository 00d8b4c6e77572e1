// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the menu dispatch controller.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::board::Board;
use super::config::{CONFIG_PATH, Config};
use super::menu::*;
use super::registry::{AppRegistry, SETTINGS_TARGET};
use super::session::Session;
use ember_hal::{
    Filesystem, Key, MockBeeper, MockClock, MockFilesystem, MockKeypad, MockReset, MockScratch,
    MockScreen, MockStorage, MountError,
};

type MockBoard = Board<
    MockFilesystem,
    MockStorage,
    MockScratch,
    MockReset,
    MockScreen,
    MockBeeper,
    MockKeypad,
    MockClock,
>;

fn board() -> MockBoard {
    Board {
        fs: MockFilesystem::new(),
        storage: MockStorage::failing(MountError::NoCard),
        scratch: MockScratch::new(),
        reset: MockReset::new(),
        screen: MockScreen::new(),
        beeper: MockBeeper::new(),
        keypad: MockKeypad::new(),
        clock: MockClock::new(),
    }
}

/// Registry over `/apps/alpha.py` and `/apps/game.py`, so the names are
/// `[alpha, game, Reload Apps, UI Sound, Settings]`.
fn menu(board: &mut MockBoard) -> Menu {
    board.fs.add_file("/apps/alpha.py", b"");
    board.fs.add_file("/apps/game.py", b"");
    Menu::new(AppRegistry::scan(&mut board.fs, &mut board.storage))
}

fn session() -> Session {
    Session::with_config(Config::default())
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn selection_wraps_in_both_directions() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();

    assert_eq!(menu.selected_name(), "alpha");
    menu.handle_key(Key::Left, &mut session, &mut board);
    assert_eq!(menu.selected_name(), "Settings");
    menu.handle_key(Key::Right, &mut session, &mut board);
    assert_eq!(menu.selected_name(), "alpha");
    menu.handle_key(Key::Right, &mut session, &mut board);
    assert_eq!(menu.selected_name(), "game");
}

#[test]
fn movement_beeps_only_when_sound_is_on() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();

    menu.handle_key(Key::Right, &mut session, &mut board);
    assert_eq!(board.beeper.played.len(), 1);
    assert_eq!(board.beeper.played[0].0, MOVE_NOTES);

    session.config.ui_sound = false;
    menu.handle_key(Key::Right, &mut session, &mut board);
    assert_eq!(board.beeper.played.len(), 1);
}

// =============================================================================
// Synthetic entries
// =============================================================================

#[test]
fn reload_rescans_and_resets_the_selection() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();

    // Move onto "Reload Apps", then drop a new app in behind its back.
    menu.handle_key(Key::Right, &mut session, &mut board);
    menu.handle_key(Key::Right, &mut session, &mut board);
    assert_eq!(menu.selected_name(), "Reload Apps");
    board.fs.add_file("/apps/new.py", b"");

    let event = menu.handle_key(Key::Select, &mut session, &mut board);
    assert_eq!(event, MenuEvent::Reloaded);
    assert_eq!(menu.selected(), 0);
    assert_eq!(menu.registry().path_of("new"), Some("/apps/new.py"));
    // No handoff, no restart.
    assert_eq!(board.reset.restarts, 0);
}

#[test]
fn sound_toggle_flips_config_and_marks_it_modified() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();

    menu.handle_key(Key::Left, &mut session, &mut board);
    menu.handle_key(Key::Left, &mut session, &mut board);
    assert_eq!(menu.selected_name(), "UI Sound");

    let event = menu.handle_key(Key::Select, &mut session, &mut board);
    assert_eq!(event, MenuEvent::SoundToggled);
    assert!(!session.config.ui_sound);
    assert!(session.modified);

    // Toggling back on confirms audibly.
    menu.handle_key(Key::Select, &mut session, &mut board);
    assert!(session.config.ui_sound);
    let last = board.beeper.played.last().unwrap();
    assert_eq!(last.0, UNMUTE_NOTES);
    assert_eq!(board.reset.restarts, 0);
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn confirming_settings_writes_its_target_and_restarts() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();

    menu.handle_key(Key::Left, &mut session, &mut board);
    let event = menu.handle_key(Key::Select, &mut session, &mut board);

    assert_eq!(
        event,
        MenuEvent::Dispatched {
            target: SETTINGS_TARGET.to_owned(),
        }
    );
    assert_eq!(board.scratch.contents(), SETTINGS_TARGET.as_bytes());
    assert!(!board.scratch.contents().windows(4).any(|w| w == b"|//|"));
    assert_eq!(board.reset.restarts, 1);
    assert!(board.screen.powered_off);
}

#[test]
fn confirming_an_app_writes_its_bare_path() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();

    let event = menu.handle_key(Key::Select, &mut session, &mut board);
    assert_eq!(
        event,
        MenuEvent::Dispatched {
            target: "/apps/alpha.py".to_owned(),
        }
    );
    assert_eq!(board.scratch.contents(), b"/apps/alpha.py");
    assert_eq!(board.reset.restarts, 1);
}

#[test]
fn modified_settings_are_flushed_before_the_restart() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();
    session.config.volume = 9;
    session.modified = true;

    menu.handle_key(Key::Select, &mut session, &mut board);

    assert!(!session.modified);
    let bytes = board.fs.read(CONFIG_PATH).unwrap();
    let stored: Config = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(stored.volume, 9);
}

#[test]
fn dispatch_beeps_after_the_screen_shuts_down() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();

    menu.handle_key(Key::Select, &mut session, &mut board);

    assert!(board.screen.powered_off);
    let last = board.beeper.played.last().unwrap();
    assert_eq!(last.0, DISPATCH_NOTES);
    assert_eq!(last.2, session.config.volume);
}

#[test]
fn muted_dispatch_stays_silent() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();
    session.config.ui_sound = false;

    menu.handle_key(Key::Select, &mut session, &mut board);
    assert!(board.beeper.played.is_empty());
    assert_eq!(board.reset.restarts, 1);
}

// =============================================================================
// Run loop
// =============================================================================

#[test]
fn run_polls_until_a_dispatch() {
    let mut board = board();
    let mut menu = menu(&mut board);
    let mut session = session();
    board.keypad.push_poll(&[Key::Right]);
    board.keypad.push_poll(&[]);
    board.keypad.push_poll(&[Key::Select]);

    let event = menu.run(&mut session, &mut board);

    assert_eq!(
        event,
        MenuEvent::Dispatched {
            target: "/apps/game.py".to_owned(),
        }
    );
    assert!(board.keypad.exhausted());
    // Two full passes slept before the dispatching poll.
    assert_eq!(board.clock.slept_ms, u64::from(MENU_POLL_SLEEP_MS) * 2);
    assert_eq!(board.beeper.played.first().unwrap().0, STARTUP_NOTES);
}
