// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The file browser: walk the tree, open files through their handlers.

#[cfg(any(test, feature = "std"))]
use std::{borrow::ToOwned, format, string::String, vec::Vec};

#[cfg(not(any(test, feature = "std")))]
use alloc::{borrow::ToOwned, format, string::String, vec::Vec};

use crate::board::Board;
use crate::dispatch::{write_exit, write_handoff};
use crate::handlers::HandlerTable;
use crate::menu::{DISPATCH_NOTES, MOVE_NOTES};
use crate::session::{Clipboard, Session};
use crate::view::ListCursor;
use ember_hal::{
    Beeper, Clock, DirEntry, Filesystem, FsError, Key, Keypad, RemovableStorage, ResetControl,
    ScratchStore, Screen,
};

/// Synthetic last row; confirming it opens the actions menu.
pub const ACTIONS_ENTRY: &str = "/.../";

/// Poll interval of the browser loop.
pub const BROWSER_POLL_SLEEP_MS: u32 = 10;

/// Paste copies file contents in chunks of this many bytes.
pub const PASTE_CHUNK_LEN: usize = 512;

const NOTE_MS: u32 = 100;

/// What one browser interaction produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// Nothing happened.
    Idle,
    /// The cursor moved.
    Moved,
    /// Descended into a directory.
    Entered {
        /// The new working directory.
        dir: String,
    },
    /// Walked up to the parent directory.
    Ascended {
        /// The new working directory.
        dir: String,
    },
    /// The actions row was confirmed; the caller opens the actions menu.
    ActionsRequested,
    /// The selected file was captured to the session clipboard.
    Copied,
    /// A file operation completed and the listing was rebuilt.
    Refreshed,
    /// A recoverable error to show the user.
    Popup {
        /// Message text.
        text: String,
    },
    /// A handoff was written and a restart requested.
    Dispatched {
        /// The handler image the handoff names.
        target: String,
        /// Absolute path of the opened file, carried as payload.
        payload: String,
    },
    /// The store was cleared and a restart requested; the boot pass
    /// will see the no-handoff sentinel and reopen the launcher.
    ExitedToLauncher,
}

/// One row of the browser listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserRow<'a> {
    /// A subdirectory.
    Dir(&'a str),
    /// A file.
    File(&'a str),
    /// The synthetic actions row.
    Actions,
}

/// The browser dispatch controller.
#[derive(Debug)]
pub struct Browser {
    cwd: String,
    entries: Vec<DirEntry>,
    cursor: ListCursor,
    handlers: HandlerTable,
}

impl Browser {
    /// Browser rooted at `/`.
    ///
    /// # Errors
    ///
    /// Fails when the root directory cannot be listed.
    pub fn new<F: Filesystem>(fs: &F, handlers: HandlerTable) -> Result<Self, FsError> {
        let mut browser = Self {
            cwd: String::from("/"),
            entries: Vec::new(),
            cursor: ListCursor::new(1),
            handlers,
        };
        browser.reload(fs)?;
        Ok(browser)
    }

    /// Current working directory.
    #[must_use]
    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// The listing without the synthetic actions row: directories first
    /// (sorted), then files (sorted).
    #[must_use]
    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    /// Number of rows including the actions entry.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.entries.len() + 1
    }

    /// Cursor state, for drawing.
    #[must_use]
    pub const fn cursor(&self) -> &ListCursor {
        &self.cursor
    }

    /// The row under the cursor.
    #[must_use]
    pub fn selected_row(&self) -> BrowserRow<'_> {
        match self.entries.get(self.cursor.index()) {
            Some(entry) if entry.is_dir => BrowserRow::Dir(&entry.name),
            Some(entry) => BrowserRow::File(&entry.name),
            None => BrowserRow::Actions,
        }
    }

    /// Run the browser until a dispatch hands the processor away.
    pub fn run<F, M, S, R, C, B, K, T>(
        &mut self,
        session: &mut Session,
        board: &mut Board<F, M, S, R, C, B, K, T>,
    ) -> BrowserEvent
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
        loop {
            for key in board.keypad.new_keys() {
                let event = self.handle_key(key, session, board);
                if matches!(
                    event,
                    BrowserEvent::Dispatched { .. } | BrowserEvent::ExitedToLauncher
                ) {
                    return event;
                }
            }
            board.screen.show_message(&self.cwd);
            board.clock.sleep_ms(BROWSER_POLL_SLEEP_MS);
        }
    }

    /// Apply one key press.
    pub fn handle_key<F, M, S, R, C, B, K, T>(
        &mut self,
        key: Key,
        session: &mut Session,
        board: &mut Board<F, M, S, R, C, B, K, T>,
    ) -> BrowserEvent
    where
        F: Filesystem,
        S: ScratchStore,
        R: ResetControl,
        C: Screen,
        B: Beeper,
    {
        match key {
            Key::Up => {
                self.cursor.move_up();
                self.move_beep(session, &mut board.beeper);
                BrowserEvent::Moved
            }
            Key::Down => {
                self.cursor.move_down();
                self.move_beep(session, &mut board.beeper);
                BrowserEvent::Moved
            }
            Key::Select => self.confirm(session, board),
            Key::Back => self.ascend(&board.fs),
            Key::Go => BrowserEvent::ActionsRequested,
            Key::Left | Key::Right => BrowserEvent::Idle,
        }
    }

    /// Capture the selected file for a later paste.
    pub fn copy(&self, session: &mut Session) -> BrowserEvent {
        match self.selected_row() {
            BrowserRow::File(name) => {
                session.clipboard = Some(Clipboard {
                    dir: self.cwd.clone(),
                    name: name.to_owned(),
                });
                BrowserEvent::Copied
            }
            BrowserRow::Dir(_) | BrowserRow::Actions => popup("select a file to copy"),
        }
    }

    /// Paste the clipboard file into the working directory.
    ///
    /// The clipboard survives the paste, so one copy can seed several
    /// directories.
    pub fn paste<F: Filesystem>(&mut self, session: &Session, fs: &mut F) -> BrowserEvent {
        let Some(clip) = &session.clipboard else {
            return popup("nothing to paste");
        };
        let src = join(&clip.dir, &clip.name);
        let dest = join(&self.cwd, &clip.name);
        match copy_file(fs, &src, &dest) {
            Ok(()) => self.refreshed(fs),
            Err(error) => popup(&format!("{error}")),
        }
    }

    /// Rename the selected file within the working directory.
    pub fn rename<F: Filesystem>(&mut self, new_name: &str, fs: &mut F) -> BrowserEvent {
        let name = match self.selected_row() {
            BrowserRow::File(name) => name.to_owned(),
            BrowserRow::Dir(_) | BrowserRow::Actions => return popup("select a file to rename"),
        };
        let from = join(&self.cwd, &name);
        let to = join(&self.cwd, new_name);
        match fs.rename(&from, &to) {
            Ok(()) => self.refreshed(fs),
            Err(error) => popup(&format!("{error}")),
        }
    }

    /// Delete the selected file.
    pub fn delete<F: Filesystem>(&mut self, fs: &mut F) -> BrowserEvent {
        let name = match self.selected_row() {
            BrowserRow::File(name) => name.to_owned(),
            BrowserRow::Dir(_) | BrowserRow::Actions => return popup("select a file to delete"),
        };
        let path = join(&self.cwd, &name);
        match fs.remove(&path) {
            Ok(()) => self.refreshed(fs),
            Err(error) => popup(&format!("{error}")),
        }
    }

    /// Create an empty file in the working directory.
    pub fn new_file<F: Filesystem>(&mut self, name: &str, fs: &mut F) -> BrowserEvent {
        let path = join(&self.cwd, name);
        if fs.exists(&path) {
            return popup(&format!("{}", FsError::AlreadyExists));
        }
        match fs.write(&path, &[]) {
            Ok(()) => self.refreshed(fs),
            Err(error) => popup(&format!("{error}")),
        }
    }

    /// Create a directory in the working directory.
    pub fn new_dir<F: Filesystem>(&mut self, name: &str, fs: &mut F) -> BrowserEvent {
        let path = join(&self.cwd, name);
        match fs.mkdir(&path) {
            Ok(()) => self.refreshed(fs),
            Err(error) => popup(&format!("{error}")),
        }
    }

    /// Re-mount the card if needed and rebuild the listing.
    pub fn refresh<F, M>(&mut self, fs: &F, storage: &mut M) -> BrowserEvent
    where
        F: Filesystem,
        M: RemovableStorage,
    {
        if !storage.is_mounted() {
            // A missing card just means the listing has no /sd entries.
            let _ = storage.mount();
        }
        self.refreshed(fs)
    }

    /// Leave the browser: clear the store, shut the panel down, restart.
    pub fn exit_to_launcher<F, M, S, R, C, B, K, T>(
        &self,
        board: &mut Board<F, M, S, R, C, B, K, T>,
    ) -> BrowserEvent
    where
        S: ScratchStore,
        R: ResetControl,
        C: Screen,
    {
        board.screen.power_off();
        write_exit(&mut board.scratch);
        board.reset.restart();
        BrowserEvent::ExitedToLauncher
    }

    fn confirm<F, M, S, R, C, B, K, T>(
        &mut self,
        session: &Session,
        board: &mut Board<F, M, S, R, C, B, K, T>,
    ) -> BrowserEvent
    where
        F: Filesystem,
        S: ScratchStore,
        R: ResetControl,
        C: Screen,
        B: Beeper,
    {
        match self.selected_row() {
            BrowserRow::Actions => BrowserEvent::ActionsRequested,
            BrowserRow::Dir(name) => {
                let name = name.to_owned();
                self.enter(&name, &board.fs)
            }
            BrowserRow::File(name) => {
                let name = name.to_owned();
                self.open_file(&name, session, board)
            }
        }
    }

    fn enter<F: Filesystem>(&mut self, name: &str, fs: &F) -> BrowserEvent {
        let dir = join(&self.cwd, name);
        let previous = core::mem::replace(&mut self.cwd, dir.clone());
        match self.reload(fs) {
            Ok(()) => BrowserEvent::Entered { dir },
            Err(error) => {
                // The previous directory was listable a moment ago.
                self.cwd = previous;
                let _ = self.reload(fs);
                popup(&format!("{error}"))
            }
        }
    }

    fn ascend<F: Filesystem>(&mut self, fs: &F) -> BrowserEvent {
        if self.cwd == "/" {
            return BrowserEvent::Idle;
        }
        let parent = parent_of(&self.cwd).to_owned();
        self.cwd.clone_from(&parent);
        match self.reload(fs) {
            Ok(()) => BrowserEvent::Ascended { dir: parent },
            Err(error) => popup(&format!("{error}")),
        }
    }

    /// The only payload-bearing dispatch in the system: the handler
    /// image is the target, the absolute file path rides as payload.
    fn open_file<F, M, S, R, C, B, K, T>(
        &self,
        name: &str,
        session: &Session,
        board: &mut Board<F, M, S, R, C, B, K, T>,
    ) -> BrowserEvent
    where
        S: ScratchStore,
        R: ResetControl,
        C: Screen,
        B: Beeper,
    {
        let payload = join(&self.cwd, name);
        let target = self.handlers.resolve(name).to_owned();
        board.screen.power_off();
        if session.config.ui_sound {
            board
                .beeper
                .play(DISPATCH_NOTES, NOTE_MS, session.config.volume);
        }
        write_handoff(&mut board.scratch, &target, Some(&payload));
        board.reset.restart();
        BrowserEvent::Dispatched { target, payload }
    }

    fn reload<F: Filesystem>(&mut self, fs: &F) -> Result<(), FsError> {
        let mut listed = fs.list_dir(&self.cwd)?;
        listed.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
        self.entries = listed;
        self.cursor.reset(self.entries.len() + 1);
        Ok(())
    }

    fn refreshed<F: Filesystem>(&mut self, fs: &F) -> BrowserEvent {
        match self.reload(fs) {
            Ok(()) => BrowserEvent::Refreshed,
            Err(error) => popup(&format!("{error}")),
        }
    }

    fn move_beep<B: Beeper>(&self, session: &Session, beeper: &mut B) {
        if session.config.ui_sound {
            beeper.play(MOVE_NOTES, NOTE_MS, session.config.volume);
        }
    }
}

fn popup(text: &str) -> BrowserEvent {
    BrowserEvent::Popup {
        text: text.to_owned(),
    }
}

/// Byte copy in bounded chunks so a large paste never needs a second
/// file-sized buffer on the device side of the facade.
fn copy_file<F: Filesystem>(fs: &mut F, src: &str, dest: &str) -> Result<(), FsError> {
    let bytes = fs.read(src)?;
    fs.write(dest, &[])?;
    for chunk in bytes.chunks(PASTE_CHUNK_LEN) {
        fs.append(dest, chunk)?;
    }
    Ok(())
}

fn join(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(pos) => &path[..pos],
    }
}
