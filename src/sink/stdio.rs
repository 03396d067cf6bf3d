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

use std::io::Write;

use crate::Channel;
use crate::Error;
use crate::Layout;
use crate::LogEntry;
use crate::Row;
use crate::layout::TableLayout;
use crate::layout::TextLayout;
use crate::sink::Sink;

/// A sink that writes to the process console.
///
/// The standard and info channels go to stdout, the warning and error channels go to stderr.
///
/// # Examples
///
/// ```
/// use konsole::sink::Console;
///
/// let console = Console::default();
/// ```
#[derive(Debug)]
pub struct Console {
    layout: Box<dyn Layout>,
    table: TableLayout,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            layout: Box::new(TextLayout::default()),
            table: TableLayout::default(),
        }
    }
}

impl Console {
    /// Sets the layout of forwarded entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use konsole::layout::JsonLayout;
    /// use konsole::sink::Console;
    ///
    /// let console = Console::default().with_layout(JsonLayout::default());
    /// ```
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Sets the layout of displayed pages.
    pub fn with_table_layout(mut self, table: TableLayout) -> Self {
        self.table = table;
        self
    }

    fn write_line(&self, channel: Channel, mut bytes: Vec<u8>) -> Result<(), Error> {
        bytes.push(b'\n');
        let result = match channel {
            Channel::Standard | Channel::Info => std::io::stdout().write_all(&bytes),
            Channel::Warning | Channel::Error => std::io::stderr().write_all(&bytes),
        };
        result.map_err(Error::from_io_error)
    }
}

impl Sink for Console {
    fn emit(&self, entry: &LogEntry) -> Result<(), Error> {
        let bytes = self.layout.format(entry)?;
        self.write_line(entry.kind().channel(), bytes)
    }

    fn notice(&self, channel: Channel, message: &str) -> Result<(), Error> {
        self.write_line(channel, message.as_bytes().to_vec())
    }

    fn table(&self, rows: &[Row]) -> Result<(), Error> {
        let text = self.table.format(rows);
        self.write_line(Channel::Standard, text.into_bytes())
    }
}
