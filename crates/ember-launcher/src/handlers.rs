// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! File-type to handler-image mapping.

#[cfg(any(test, feature = "std"))]
use std::{borrow::ToOwned, collections::BTreeMap, string::String};

#[cfg(not(any(test, feature = "std")))]
use alloc::{borrow::ToOwned, collections::BTreeMap, string::String};

/// Handler image used when no table entry matches.
pub const DEFAULT_HANDLER: &str = ".frozen/launcher/editor.py";

/// Maps a file extension to the image that opens files of that type.
///
/// The table is a plain value so tests and future settings screens can
/// build their own instead of patching a global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerTable {
    entries: BTreeMap<String, String>,
    default: String,
}

impl HandlerTable {
    /// The built-in table: source and plain-text files open in the
    /// editor, as does anything without an extension.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(DEFAULT_HANDLER)
            .with_handler("", DEFAULT_HANDLER)
            .with_handler("py", DEFAULT_HANDLER)
            .with_handler("txt", DEFAULT_HANDLER)
    }

    /// Empty table with the given default handler.
    #[must_use]
    pub fn new(default: &str) -> Self {
        Self {
            entries: BTreeMap::new(),
            default: default.to_owned(),
        }
    }

    /// Add or replace the handler for one extension (no leading dot).
    #[must_use]
    pub fn with_handler(mut self, extension: &str, target: &str) -> Self {
        self.entries.insert(extension.to_owned(), target.to_owned());
        self
    }

    /// Resolve the handler image for a file name.
    ///
    /// The extension is everything after the last `.`; a name without
    /// one resolves like an empty extension.
    #[must_use]
    pub fn resolve(&self, file_name: &str) -> &str {
        let extension = file_name.rsplit_once('.').map_or("", |(_, ext)| ext);
        self.entries
            .get(extension)
            .map_or(self.default.as_str(), String::as_str)
    }
}
