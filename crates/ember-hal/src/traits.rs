// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Hardware contracts for the handoff core.

#[cfg(any(test, feature = "std"))]
use std::{string::String, vec::Vec};

#[cfg(not(any(test, feature = "std")))]
use alloc::{string::String, vec::Vec};

/// How the current restart was triggered.
///
/// Everything except [`ResetCause::PowerOn`] leaves the scratch store
/// intact; a power-on means its prior contents are stale and untrustworthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCause {
    /// Full power cycle - volatile and scratch state are both gone.
    PowerOn,
    /// Software-requested restart (the normal handoff path).
    Soft,
    /// Watchdog fired, typically because an image hung or crashed.
    Watchdog,
}

impl ResetCause {
    /// Whether the scratch store survived this restart.
    #[must_use]
    pub const fn scratch_survived(self) -> bool {
        !matches!(self, Self::PowerOn)
    }
}

/// Reset cause query and restart request.
pub trait ResetControl {
    /// Cause of the restart that started the current image.
    fn cause(&self) -> ResetCause;

    /// Request an immediate restart.
    ///
    /// On hardware this never returns; the mock records the request and
    /// returns so tests can observe state at the moment of reset.
    fn restart(&mut self);
}

/// Errors writing the scratch store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScratchError {
    /// The message exceeds the store's fixed capacity.
    TooLarge {
        /// Capacity of the store in bytes.
        capacity: usize,
    },
}

impl core::fmt::Display for ScratchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooLarge { capacity } => {
                write!(f, "message exceeds scratch capacity of {capacity} bytes")
            }
        }
    }
}

/// The non-volatile scratch region.
///
/// Retains its contents across a soft restart, cleared by a power cycle.
/// This is the *only* channel of communication between the image running
/// before a restart and the bootstrap running after it.
pub trait ScratchStore {
    /// Fixed capacity of the region in bytes.
    fn capacity(&self) -> usize;

    /// Copy the stored bytes into `buf`, returning how many were copied.
    ///
    /// Contents longer than `buf` are truncated; readers size their buffer
    /// to [`ScratchStore::capacity`].
    fn read(&self, buf: &mut [u8]) -> usize;

    /// Replace the stored bytes. An empty slice clears the store.
    ///
    /// # Errors
    ///
    /// Fails when `bytes` exceeds the capacity.
    fn write(&mut self, bytes: &[u8]) -> Result<(), ScratchError>;
}

/// Errors mounting removable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountError {
    /// No card is inserted.
    NoCard,
    /// The card is present but could not be mounted.
    IoFailed,
}

impl core::fmt::Display for MountError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoCard => write!(f, "no removable card present"),
            Self::IoFailed => write!(f, "removable card failed to mount"),
        }
    }
}

/// Removable storage (the SD card slot).
pub trait RemovableStorage {
    /// Whether the card is currently mounted.
    fn is_mounted(&self) -> bool;

    /// Mount the card, making its tree visible to the [`Filesystem`].
    ///
    /// # Errors
    ///
    /// Fails when no card is present or the mount itself fails. Callers in
    /// the handoff core treat this as transient: they log and continue.
    fn mount(&mut self) -> Result<(), MountError>;
}

/// One directory entry, as reported by the filesystem facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name within its directory (no path components).
    pub name: String,
    /// Whether this entry is itself a directory.
    pub is_dir: bool,
}

/// Errors from the filesystem facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// Path does not exist.
    NotFound,
    /// Expected a directory, found a file.
    NotADirectory,
    /// Expected a file, found a directory.
    IsADirectory,
    /// Create failed because the path already exists.
    AlreadyExists,
    /// The medium rejected the operation.
    Io,
}

impl core::fmt::Display for FsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "no such file or directory"),
            Self::NotADirectory => write!(f, "not a directory"),
            Self::IsADirectory => write!(f, "is a directory"),
            Self::AlreadyExists => write!(f, "already exists"),
            Self::Io => write!(f, "i/o error"),
        }
    }
}

/// Flat filesystem facade over flash (and the mounted card under `/sd`).
///
/// Paths are absolute, `/`-separated. Directory listing and byte-level
/// file access are all the handoff core needs; everything else about the
/// underlying filesystem is out of scope.
pub trait Filesystem {
    /// Whether a path exists (file or directory).
    fn exists(&self, path: &str) -> bool;

    /// List the direct children of a directory.
    ///
    /// # Errors
    ///
    /// Fails when the path is missing or not a directory.
    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError>;

    /// Read a whole file.
    ///
    /// # Errors
    ///
    /// Fails when the path is missing or a directory.
    fn read(&self, path: &str) -> Result<Vec<u8>, FsError>;

    /// Create or replace a file.
    ///
    /// # Errors
    ///
    /// Fails when the parent directory is missing or the path is a directory.
    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), FsError>;

    /// Append to a file, creating it when missing.
    ///
    /// # Errors
    ///
    /// Fails when the parent directory is missing or the path is a directory.
    fn append(&mut self, path: &str, bytes: &[u8]) -> Result<(), FsError>;

    /// Create a directory.
    ///
    /// # Errors
    ///
    /// Fails when the path exists or the parent is missing.
    fn mkdir(&mut self, path: &str) -> Result<(), FsError>;

    /// Remove a file.
    ///
    /// # Errors
    ///
    /// Fails when the path is missing or a directory.
    fn remove(&mut self, path: &str) -> Result<(), FsError>;

    /// Rename a file within its directory.
    ///
    /// # Errors
    ///
    /// Fails when the source is missing or the destination exists.
    fn rename(&mut self, from: &str, to: &str) -> Result<(), FsError>;
}

/// Errors loading an application image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// No image at the given path.
    NotFound,
    /// The image exists but failed to start.
    Failed,
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "image not found"),
            Self::Failed => write!(f, "image failed to start"),
        }
    }
}

/// Loads and executes an application image by path.
///
/// On hardware a successful load transfers control to the image and the
/// call only returns once that image gives the processor back (it usually
/// never does - it restarts instead). The mock records the attempt.
pub trait ImageLoader {
    /// Load and run the image at `target`.
    ///
    /// # Errors
    ///
    /// Fails when the image is missing or refuses to start.
    fn load(&mut self, target: &str) -> Result<(), LoadError>;
}

/// Minimal display surface.
///
/// The menu's visual chrome (icons, easing, scrollbars) lives in the
/// display driver, not here; the core needs only a status line and the
/// ability to shut the panel down cleanly before a restart.
pub trait Screen {
    /// Show a short status or error message.
    fn show_message(&mut self, text: &str);

    /// Blank the panel and release its bus.
    ///
    /// Called before a restart so the panel is not left half-driven
    /// across the reset.
    fn power_off(&mut self);
}

/// A key event from the keyboard matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Move selection left.
    Left,
    /// Move selection right.
    Right,
    /// Move cursor up.
    Up,
    /// Move cursor down.
    Down,
    /// Confirm the current selection.
    Select,
    /// Open the context actions menu.
    Go,
    /// Go back / up one directory.
    Back,
}

/// Keyboard scan driver.
pub trait Keypad {
    /// Keys newly pressed since the last poll.
    ///
    /// Held keys are reported once; the scan driver does the debouncing.
    fn new_keys(&mut self) -> Vec<Key>;
}

/// Piezo beeper for UI feedback.
pub trait Beeper {
    /// Play a space-separated note sequence, e.g. `"C4 D4 D4"`.
    fn play(&mut self, notes: &str, duration_ms: u32, volume: u8);
}

/// Millisecond time source for the polling loops.
pub trait Clock {
    /// Sleep for the given number of milliseconds.
    fn sleep_ms(&mut self, ms: u32);
}

/// Errors appending to the durable log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalError {
    /// The append could not be persisted.
    WriteFailed,
}

impl core::fmt::Display for JournalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WriteFailed => write!(f, "journal append failed"),
        }
    }
}

/// Durable, append-only error log.
///
/// The boot dispatcher records load failures here. Append failures are
/// swallowed by callers - a device that cannot log must still boot.
pub trait Journal {
    /// Append one line to the log.
    ///
    /// # Errors
    ///
    /// Fails when the line cannot be persisted.
    fn append(&mut self, line: &str) -> Result<(), JournalError>;
}
