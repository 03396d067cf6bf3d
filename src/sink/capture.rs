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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::Channel;
use crate::Error;
use crate::Layout;
use crate::LogEntry;
use crate::Row;
use crate::layout::TextLayout;
use crate::sink::Sink;

/// One line written to a [`Capture`] sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    /// The channel the line was written to.
    pub channel: Channel,
    /// The formatted line.
    pub line: String,
}

#[derive(Debug, Default)]
struct Buffer {
    lines: Vec<Captured>,
    tables: Vec<Vec<Row>>,
}

/// A sink that keeps everything written to it in memory.
///
/// Clones share the same buffer, so a test can hand one clone to a
/// [`Context`](crate::Context) and inspect the output through another.
///
/// # Examples
///
/// ```
/// use konsole::Context;
/// use konsole::sink::Capture;
///
/// let capture = Capture::default();
/// let context = Context::builder().sink(capture.clone()).build();
/// ```
#[derive(Debug, Clone)]
pub struct Capture {
    layout: Arc<dyn Layout>,
    buffer: Arc<Mutex<Buffer>>,
}

impl Default for Capture {
    fn default() -> Self {
        Self {
            layout: Arc::new(TextLayout::default().no_color()),
            buffer: Arc::default(),
        }
    }
}

impl Capture {
    /// Sets the layout of forwarded entries.
    pub fn with_layout(mut self, layout: impl Layout) -> Self {
        self.layout = Arc::new(layout);
        self
    }

    /// All captured lines, in write order.
    pub fn lines(&self) -> Vec<Captured> {
        self.lock().lines.clone()
    }

    /// The captured lines of one channel, in write order.
    pub fn lines_of(&self, channel: Channel) -> Vec<String> {
        self.lock()
            .lines
            .iter()
            .filter(|captured| captured.channel == channel)
            .map(|captured| captured.line.clone())
            .collect()
    }

    /// All captured tables, in write order.
    pub fn tables(&self) -> Vec<Vec<Row>> {
        self.lock().tables.clone()
    }

    /// Forget everything captured so far.
    pub fn clear(&self) {
        let mut buffer = self.lock();
        buffer.lines.clear();
        buffer.tables.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Buffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, channel: Channel, line: String) {
        self.lock().lines.push(Captured { channel, line });
    }
}

impl Sink for Capture {
    fn emit(&self, entry: &LogEntry) -> Result<(), Error> {
        let bytes = self.layout.format(entry)?;
        self.push(
            entry.kind().channel(),
            String::from_utf8_lossy(&bytes).into_owned(),
        );
        Ok(())
    }

    fn notice(&self, channel: Channel, message: &str) -> Result<(), Error> {
        self.push(channel, message.to_string());
        Ok(())
    }

    fn table(&self, rows: &[Row]) -> Result<(), Error> {
        self.lock().tables.push(rows.to_vec());
        Ok(())
    }
}
