// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use jiff::Timestamp;
use serde::Serialize;

use crate::LogEntry;
use crate::LogKind;

/// One stored entry, flattened for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    index: usize,
    message: String,
    timestamp: Timestamp,
    namespace: String,
    kind: LogKind,
}

impl Row {
    pub(crate) fn new(index: usize, entry: &LogEntry) -> Row {
        Row {
            index,
            message: entry.message(),
            timestamp: entry.timestamp(),
            namespace: entry.namespace().to_string(),
            kind: entry.kind(),
        }
    }

    /// The position of the entry among the stored entries when it was displayed.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The space-joined rendering of the entry's messages.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The creation time of the entry.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The namespace of the entry.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The kind of the entry.
    pub fn kind(&self) -> LogKind {
        self.kind
    }
}

/// A displayed slice `[start, end)` of the stored entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) rows: Vec<Row>,
    pub(crate) last: bool,
}

impl Page {
    /// Index of the first entry on this page.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index one past the last entry on this page.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The displayed rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consume the page, returning its rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Whether this page reached the end of the stored entries.
    pub fn is_last(&self) -> bool {
        self.last
    }
}

/// The outcome of one [`Konsole::view_logs`](crate::Konsole::view_logs) call.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    /// The cursor was already past the last entry; it has been rewound to the start.
    Exhausted,
    /// The next page of entries.
    Page(Page),
}

impl Batch {
    /// Whether there was nothing left to display.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Batch::Exhausted)
    }

    /// The displayed page, if any.
    pub fn page(&self) -> Option<&Page> {
        match self {
            Batch::Exhausted => None,
            Batch::Page(page) => Some(page),
        }
    }

    /// The `[start, end)` range of the displayed page, if any.
    pub fn range(&self) -> Option<std::ops::Range<usize>> {
        self.page().map(|page| page.start..page.end)
    }
}
