// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock hardware for host testing.
//!
//! Every trait in [`crate::traits`] has a recording mock here. The mocks
//! are deliberately simple: fixed buffers, in-memory trees, scripted key
//! queues. They record every interaction so tests can assert on the exact
//! sequence of hardware effects a controller produced.

#![allow(clippy::panic)] // Test infrastructure - panicking on invalid setup is correct

use crate::traits::{
    Beeper, Clock, DirEntry, Filesystem, FsError, ImageLoader, Journal, JournalError, Key, Keypad,
    LoadError, MountError, RemovableStorage, ResetCause, ResetControl, ScratchError, ScratchStore,
    Screen,
};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::string::{String, ToString};
use std::vec::Vec;

/// Capacity of the real scratch region (RTC user memory).
pub const SCRATCH_CAPACITY: usize = 2048;

/// In-memory scratch store with the capacity of the real part.
#[derive(Debug)]
pub struct MockScratch {
    data: Vec<u8>,
    capacity: usize,
    /// Number of successful writes, for single-writer assertions.
    pub writes: usize,
}

impl MockScratch {
    /// Empty store, as after a power cycle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: SCRATCH_CAPACITY,
            writes: 0,
        }
    }

    /// Store pre-loaded with `bytes`, as after a prior handoff write.
    #[must_use]
    pub fn with_contents(bytes: &[u8]) -> Self {
        let mut scratch = Self::new();
        scratch.data = bytes.to_vec();
        scratch
    }

    /// Current raw contents.
    #[must_use]
    pub fn contents(&self) -> &[u8] {
        &self.data
    }
}

impl Default for MockScratch {
    fn default() -> Self {
        Self::new()
    }
}

impl ScratchStore for MockScratch {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn read(&self, buf: &mut [u8]) -> usize {
        let len = self.data.len().min(buf.len());
        buf[..len].copy_from_slice(&self.data[..len]);
        len
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ScratchError> {
        if bytes.len() > self.capacity {
            return Err(ScratchError::TooLarge {
                capacity: self.capacity,
            });
        }
        self.data = bytes.to_vec();
        self.writes += 1;
        Ok(())
    }
}

/// Reset controller that records restart requests instead of resetting.
#[derive(Debug)]
pub struct MockReset {
    cause: ResetCause,
    /// Number of restart requests issued.
    pub restarts: usize,
}

impl MockReset {
    /// Controller reporting a soft reset (the common handoff case).
    #[must_use]
    pub const fn new() -> Self {
        Self::with_cause(ResetCause::Soft)
    }

    /// Controller reporting the given reset cause.
    #[must_use]
    pub const fn with_cause(cause: ResetCause) -> Self {
        Self { cause, restarts: 0 }
    }
}

impl Default for MockReset {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetControl for MockReset {
    fn cause(&self) -> ResetCause {
        self.cause
    }

    fn restart(&mut self) {
        self.restarts += 1;
    }
}

/// Removable storage slot with scriptable mount failures.
#[derive(Debug, Default)]
pub struct MockStorage {
    mounted: bool,
    /// When set, every mount attempt fails with this error.
    pub fail_mount: Option<MountError>,
    /// Number of mount attempts, successful or not.
    pub mount_attempts: usize,
}

impl MockStorage {
    /// Unmounted slot with a working card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot whose mount attempts always fail.
    #[must_use]
    pub const fn failing(error: MountError) -> Self {
        Self {
            mounted: false,
            fail_mount: Some(error),
            mount_attempts: 0,
        }
    }
}

impl RemovableStorage for MockStorage {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn mount(&mut self) -> Result<(), MountError> {
        self.mount_attempts += 1;
        if let Some(error) = self.fail_mount {
            return Err(error);
        }
        self.mounted = true;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// In-memory filesystem tree.
///
/// Paths are absolute and `/`-separated; the root directory always exists.
#[derive(Debug, Default)]
pub struct MockFilesystem {
    nodes: BTreeMap<String, Node>,
}

fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        out.push('/');
    }
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(pos) => &path[..pos],
    }
}

impl MockFilesystem {
    /// Empty filesystem (just the root directory).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory, creating missing parents (test setup helper).
    pub fn add_dir(&mut self, path: &str) {
        let path = normalize(path);
        if path == "/" {
            return;
        }
        self.add_dir(parent_of(&path));
        self.nodes.entry(path).or_insert(Node::Dir);
    }

    /// Create a file with contents, creating missing parents (test setup helper).
    pub fn add_file(&mut self, path: &str, bytes: &[u8]) {
        let path = normalize(path);
        self.add_dir(parent_of(&path));
        self.nodes.insert(path, Node::File(bytes.to_vec()));
    }

    fn dir_exists(&self, path: &str) -> bool {
        path == "/" || matches!(self.nodes.get(path), Some(Node::Dir))
    }
}

impl Filesystem for MockFilesystem {
    fn exists(&self, path: &str) -> bool {
        let path = normalize(path);
        path == "/" || self.nodes.contains_key(&path)
    }

    fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, FsError> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            None if path != "/" => return Err(FsError::NotFound),
            Some(Node::File(_)) => return Err(FsError::NotADirectory),
            _ => {}
        }

        let prefix = if path == "/" {
            String::from("/")
        } else {
            let mut p = path.clone();
            p.push('/');
            p
        };

        let mut entries = Vec::new();
        for (key, node) in &self.nodes {
            let Some(rest) = key.strip_prefix(&prefix) else {
                continue;
            };
            if rest.is_empty() || rest.contains('/') {
                continue;
            }
            entries.push(DirEntry {
                name: rest.to_string(),
                is_dir: matches!(node, Node::Dir),
            });
        }
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, FsError> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            Some(Node::Dir) => Err(FsError::IsADirectory),
            None => Err(FsError::NotFound),
        }
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> Result<(), FsError> {
        let path = normalize(path);
        if matches!(self.nodes.get(&path), Some(Node::Dir)) {
            return Err(FsError::IsADirectory);
        }
        if !self.dir_exists(parent_of(&path)) {
            return Err(FsError::NotFound);
        }
        self.nodes.insert(path, Node::File(bytes.to_vec()));
        Ok(())
    }

    fn append(&mut self, path: &str, bytes: &[u8]) -> Result<(), FsError> {
        let path = normalize(path);
        match self.nodes.get_mut(&path) {
            Some(Node::File(existing)) => {
                existing.extend_from_slice(bytes);
                Ok(())
            }
            Some(Node::Dir) => Err(FsError::IsADirectory),
            None => self.write(&path, bytes),
        }
    }

    fn mkdir(&mut self, path: &str) -> Result<(), FsError> {
        let path = normalize(path);
        if path == "/" || self.nodes.contains_key(&path) {
            return Err(FsError::AlreadyExists);
        }
        if !self.dir_exists(parent_of(&path)) {
            return Err(FsError::NotFound);
        }
        self.nodes.insert(path, Node::Dir);
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<(), FsError> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            Some(Node::File(_)) => {
                self.nodes.remove(&path);
                Ok(())
            }
            Some(Node::Dir) => Err(FsError::IsADirectory),
            None => Err(FsError::NotFound),
        }
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), FsError> {
        let from = normalize(from);
        let to = normalize(to);
        if self.nodes.contains_key(&to) {
            return Err(FsError::AlreadyExists);
        }
        if !self.dir_exists(parent_of(&to)) {
            return Err(FsError::NotFound);
        }
        match self.nodes.remove(&from) {
            Some(Node::File(bytes)) => {
                self.nodes.insert(to, Node::File(bytes));
                Ok(())
            }
            Some(Node::Dir) => {
                self.nodes.insert(from, Node::Dir);
                Err(FsError::IsADirectory)
            }
            None => Err(FsError::NotFound),
        }
    }
}

/// Image loader that records every attempt.
#[derive(Debug, Default)]
pub struct MockImageLoader {
    available: BTreeSet<String>,
    broken: BTreeSet<String>,
    /// Every load attempt, in order.
    pub attempts: Vec<String>,
    /// The image that last loaded successfully, if any.
    pub running: Option<String>,
}

impl MockImageLoader {
    /// Loader with no images at all.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image that loads successfully.
    pub fn add_image(&mut self, target: &str) {
        self.available.insert(target.to_string());
    }

    /// Register an image that exists but fails to start.
    pub fn add_broken_image(&mut self, target: &str) {
        self.broken.insert(target.to_string());
    }
}

impl ImageLoader for MockImageLoader {
    fn load(&mut self, target: &str) -> Result<(), LoadError> {
        self.attempts.push(target.to_string());
        if self.available.contains(target) {
            self.running = Some(target.to_string());
            return Ok(());
        }
        if self.broken.contains(target) {
            return Err(LoadError::Failed);
        }
        Err(LoadError::NotFound)
    }
}

/// Screen that records messages and power state.
#[derive(Debug, Default)]
pub struct MockScreen {
    /// Every message shown, in order.
    pub messages: Vec<String>,
    /// Whether the panel was shut down.
    pub powered_off: bool,
}

impl MockScreen {
    /// Powered-on screen with no messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for MockScreen {
    fn show_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }

    fn power_off(&mut self) {
        self.powered_off = true;
    }
}

/// Keypad replaying a scripted sequence of polls.
#[derive(Debug, Default)]
pub struct MockKeypad {
    polls: VecDeque<Vec<Key>>,
}

impl MockKeypad {
    /// Keypad with nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the key events for one poll.
    pub fn push_poll(&mut self, keys: &[Key]) {
        self.polls.push_back(keys.to_vec());
    }

    /// Whether all scripted polls have been consumed.
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.polls.is_empty()
    }
}

impl Keypad for MockKeypad {
    fn new_keys(&mut self) -> Vec<Key> {
        self.polls.pop_front().unwrap_or_default()
    }
}

/// Beeper recording every note sequence played.
#[derive(Debug, Default)]
pub struct MockBeeper {
    /// `(notes, duration_ms, volume)` per play call.
    pub played: Vec<(String, u32, u8)>,
}

impl MockBeeper {
    /// Silent beeper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Beeper for MockBeeper {
    fn play(&mut self, notes: &str, duration_ms: u32, volume: u8) {
        self.played.push((notes.to_string(), duration_ms, volume));
    }
}

/// Clock summing requested sleeps instead of sleeping.
#[derive(Debug, Default)]
pub struct MockClock {
    /// Total milliseconds slept.
    pub slept_ms: u64,
}

impl MockClock {
    /// Clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for MockClock {
    fn sleep_ms(&mut self, ms: u32) {
        self.slept_ms += u64::from(ms);
    }
}

/// Journal recording appended lines, with optional failure injection.
#[derive(Debug, Default)]
pub struct MockJournal {
    /// Every appended line, in order.
    pub lines: Vec<String>,
    /// When set, every append fails.
    pub fail: bool,
}

impl MockJournal {
    /// Working journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Journal for MockJournal {
    fn append(&mut self, line: &str) -> Result<(), JournalError> {
        if self.fail {
            return Err(JournalError::WriteFailed);
        }
        self.lines.push(line.to_string());
        Ok(())
    }
}
