// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The launcher menu: pick an entry, hand the processor to it.

#[cfg(any(test, feature = "std"))]
use std::{borrow::ToOwned, string::String};

#[cfg(not(any(test, feature = "std")))]
use alloc::{borrow::ToOwned, string::String};

use crate::board::Board;
use crate::dispatch::write_handoff;
use crate::registry::{AppRegistry, RELOAD_ENTRY, SOUND_ENTRY};
use crate::session::Session;
use ember_hal::{
    Beeper, Clock, Filesystem, Key, Keypad, RemovableStorage, ResetControl, ScratchStore, Screen,
};

/// Chord played once when the menu opens.
pub const STARTUP_NOTES: &str = "C4 D4 D4";

/// Selection movement blip.
pub const MOVE_NOTES: &str = "D6 C5";

/// Chord played just before handing the processor to a new image.
pub const DISPATCH_NOTES: &str = "C4 B4 C5 C5";

/// Confirmation chord when UI sound is switched back on.
pub const UNMUTE_NOTES: &str = "C4 G4 G4";

/// Poll interval of the menu loop.
pub const MENU_POLL_SLEEP_MS: u32 = 4;

const NOTE_MS: u32 = 100;

/// What one key press did to the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// The key had no effect.
    Idle,
    /// The selection moved.
    Moved,
    /// The registry was rescanned in place.
    Reloaded,
    /// UI sound was toggled.
    SoundToggled,
    /// A handoff was written and a restart requested.
    Dispatched {
        /// The image the handoff names.
        target: String,
    },
}

/// The menu dispatch controller.
#[derive(Debug)]
pub struct Menu {
    registry: AppRegistry,
    selected: usize,
}

impl Menu {
    /// Menu over a scanned registry, selection at the first entry.
    #[must_use]
    pub const fn new(registry: AppRegistry) -> Self {
        Self {
            registry,
            selected: 0,
        }
    }

    /// The registry backing the menu.
    #[must_use]
    pub const fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    /// Index of the selected entry.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Name of the selected entry.
    #[must_use]
    pub fn selected_name(&self) -> &str {
        self.registry
            .names()
            .get(self.selected)
            .map_or("", String::as_str)
    }

    /// Run the menu until a dispatch hands the processor away.
    ///
    /// On hardware the restart inside the dispatch never returns, so the
    /// loop runs until the device resets. In tests the scripted keypad
    /// must end in a confirming press.
    pub fn run<F, M, S, R, C, B, K, T>(
        &mut self,
        session: &mut Session,
        board: &mut Board<F, M, S, R, C, B, K, T>,
    ) -> MenuEvent
    where
        F: Filesystem,
        M: RemovableStorage,
        S: ScratchStore,
        R: ResetControl,
        C: Screen,
        B: Beeper,
        K: Keypad,
        T: Clock,
    {
        if session.config.ui_sound {
            board
                .beeper
                .play(STARTUP_NOTES, NOTE_MS, session.config.volume);
        }
        loop {
            for key in board.keypad.new_keys() {
                let event = self.handle_key(key, session, board);
                if matches!(event, MenuEvent::Dispatched { .. }) {
                    return event;
                }
            }
            board.screen.show_message(self.selected_name());
            board.clock.sleep_ms(MENU_POLL_SLEEP_MS);
        }
    }

    /// Apply one key press.
    pub fn handle_key<F, M, S, R, C, B, K, T>(
        &mut self,
        key: Key,
        session: &mut Session,
        board: &mut Board<F, M, S, R, C, B, K, T>,
    ) -> MenuEvent
    where
        F: Filesystem,
        M: RemovableStorage,
        S: ScratchStore,
        R: ResetControl,
        C: Screen,
        B: Beeper,
    {
        match key {
            Key::Left => self.move_selection(true, session, board),
            Key::Right => self.move_selection(false, session, board),
            Key::Select => self.confirm(session, board),
            Key::Up | Key::Down | Key::Go | Key::Back => MenuEvent::Idle,
        }
    }

    fn move_selection<F, M, S, R, C, B, K, T>(
        &mut self,
        backwards: bool,
        session: &Session,
        board: &mut Board<F, M, S, R, C, B, K, T>,
    ) -> MenuEvent
    where
        B: Beeper,
    {
        let len = self.registry.len();
        if len == 0 {
            return MenuEvent::Idle;
        }
        self.selected = if backwards {
            match self.selected.checked_sub(1) {
                Some(index) => index,
                None => len - 1,
            }
        } else {
            (self.selected + 1) % len
        };
        if session.config.ui_sound {
            board.beeper.play(MOVE_NOTES, NOTE_MS, session.config.volume);
        }
        MenuEvent::Moved
    }

    fn confirm<F, M, S, R, C, B, K, T>(
        &mut self,
        session: &mut Session,
        board: &mut Board<F, M, S, R, C, B, K, T>,
    ) -> MenuEvent
    where
        F: Filesystem,
        M: RemovableStorage,
        S: ScratchStore,
        R: ResetControl,
        C: Screen,
        B: Beeper,
    {
        let name = self.selected_name().to_owned();
        match name.as_str() {
            RELOAD_ENTRY => {
                self.registry = AppRegistry::scan(&mut board.fs, &mut board.storage);
                self.selected = 0;
                MenuEvent::Reloaded
            }
            SOUND_ENTRY => {
                session.config.ui_sound = !session.config.ui_sound;
                session.modified = true;
                if session.config.ui_sound {
                    board
                        .beeper
                        .play(UNMUTE_NOTES, NOTE_MS, session.config.volume);
                }
                MenuEvent::SoundToggled
            }
            _ => {
                let Some(target) = self.registry.path_of(&name) else {
                    return MenuEvent::Idle;
                };
                let target = target.to_owned();
                dispatch_to(&target, session, board);
                MenuEvent::Dispatched { target }
            }
        }
    }
}

/// The point of no return: flush settings, shut the panel down, write
/// the handoff, restart. Order matters; nothing after the restart runs
/// on hardware.
fn dispatch_to<F, M, S, R, C, B, K, T>(
    target: &str,
    session: &mut Session,
    board: &mut Board<F, M, S, R, C, B, K, T>,
) where
    F: Filesystem,
    S: ScratchStore,
    R: ResetControl,
    C: Screen,
    B: Beeper,
{
    if session.flush(&mut board.fs).is_err() {
        board.screen.show_message("couldn't save settings");
    }
    board.screen.power_off();
    if session.config.ui_sound {
        board
            .beeper
            .play(DISPATCH_NOTES, NOTE_MS, session.config.volume);
    }
    write_handoff(&mut board.scratch, target, None);
    board.reset.restart();
}
