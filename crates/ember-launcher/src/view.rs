// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Cursor and view window over a fixed-height list.

/// Rows visible at once on the panel.
pub const ITEMS_PER_SCREEN: usize = 4;

/// A wrapping cursor whose view window follows it.
///
/// Pure index arithmetic; drawing the rows is the display driver's
/// business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCursor {
    index: usize,
    view_start: usize,
    len: usize,
}

impl ListCursor {
    /// Cursor at the top of a list of `len` items.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            index: 0,
            view_start: 0,
            len,
        }
    }

    /// Current item index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Index of the first visible item.
    #[must_use]
    pub const fn view_start(&self) -> usize {
        self.view_start
    }

    /// Number of items under the cursor.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Back to the top of a list with a new length.
    pub const fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    /// Move up one item, wrapping to the bottom.
    pub const fn move_up(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = match self.index.checked_sub(1) {
            Some(index) => index,
            None => self.len - 1,
        };
        self.follow();
    }

    /// Move down one item, wrapping to the top.
    pub const fn move_down(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = if self.index + 1 == self.len {
            0
        } else {
            self.index + 1
        };
        self.follow();
    }

    const fn follow(&mut self) {
        if self.index < self.view_start {
            self.view_start = self.index;
        } else if self.index >= self.view_start + ITEMS_PER_SCREEN {
            self.view_start = self.index - ITEMS_PER_SCREEN + 1;
        }
    }
}
