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

use std::borrow::Cow;
use std::fmt::Write;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::Row;

const HEADER: [&str; 5] = ["index", "message", "timestamp", "namespace", "kind"];

/// A layout that renders a page of [`Row`]s as a text table.
///
/// Output format:
///
/// ```text
/// +-------+---------------------+----------------------+-----------+------+
/// | index | message             | timestamp            | namespace | kind |
/// +-------+---------------------+----------------------+-----------+------+
/// | 0     | hello               | 1970-01-01T00:00:00Z | Auth      | log  |
/// | 1     | ready {"port":8080} | 1970-01-01T00:00:01Z | Auth      | info |
/// +-------+---------------------+----------------------+-----------+------+
/// ```
///
/// Timestamps are printed in UTC unless a timezone is set. Control characters in messages, such
/// as newlines, are escaped so that every row stays on one line.
#[derive(Debug, Clone, Default)]
pub struct TableLayout {
    tz: Option<TimeZone>,
}

impl TableLayout {
    /// Sets the timezone for timestamps.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use konsole::layout::TableLayout;
    ///
    /// let table_layout = TableLayout::default().timezone(TimeZone::system());
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    fn timestamp(&self, timestamp: Timestamp) -> String {
        match self.tz.clone() {
            Some(tz) => timestamp
                .to_zoned(tz)
                .strftime("%Y-%m-%dT%H:%M:%S.%6f%:z")
                .to_string(),
            None => timestamp.to_string(),
        }
    }

    /// Render rows as a table, without a trailing newline.
    pub fn format(&self, rows: &[Row]) -> String {
        let cells = rows
            .iter()
            .map(|row| {
                [
                    row.index().to_string(),
                    flatten(row.message()).into_owned(),
                    self.timestamp(row.timestamp()),
                    row.namespace().to_string(),
                    row.kind().to_string(),
                ]
            })
            .collect::<Vec<_>>();

        let mut widths = HEADER.map(|h| h.chars().count());
        for line in &cells {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let border = widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+");

        let mut text = String::new();
        // SAFETY: write to a string always succeeds
        writeln!(&mut text, "+{border}+").unwrap();
        write_line(&mut text, &widths, HEADER);
        writeln!(&mut text, "+{border}+").unwrap();
        for line in &cells {
            write_line(&mut text, &widths, line.each_ref().map(String::as_str));
        }
        write!(&mut text, "+{border}+").unwrap();
        text
    }
}

// one line per row
fn flatten(message: &str) -> Cow<'_, str> {
    if !message.chars().any(char::is_control) {
        return Cow::Borrowed(message);
    }

    let mut flat = String::with_capacity(message.len());
    for c in message.chars() {
        if c.is_control() {
            flat.extend(c.escape_default());
        } else {
            flat.push(c);
        }
    }
    Cow::Owned(flat)
}

fn write_line(text: &mut String, widths: &[usize; 5], cells: [&str; 5]) {
    text.push('|');
    for (cell, &width) in cells.iter().zip(widths) {
        // SAFETY: write to a string always succeeds
        write!(text, " {cell:<width$} |").unwrap();
    }
    text.push('\n');
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use serde_json::json;

    use super::*;
    use crate::LogEntry;
    use crate::LogKind;

    #[test]
    fn test_table_rendering() {
        let first = LogEntry::new(
            vec![json!("hello")],
            Timestamp::UNIX_EPOCH,
            "Auth",
            LogKind::Log,
        );
        let second = LogEntry::new(
            vec![json!("ready"), json!({"port": 8080})],
            Timestamp::from_second(1).unwrap(),
            "Auth",
            LogKind::Info,
        );
        let rows = vec![Row::new(0, &first), Row::new(1, &second)];

        insta::assert_snapshot!(TableLayout::default().format(&rows), @r#"
        +-------+---------------------+----------------------+-----------+------+
        | index | message             | timestamp            | namespace | kind |
        +-------+---------------------+----------------------+-----------+------+
        | 0     | hello               | 1970-01-01T00:00:00Z | Auth      | log  |
        | 1     | ready {"port":8080} | 1970-01-01T00:00:01Z | Auth      | info |
        +-------+---------------------+----------------------+-----------+------+
        "#);
    }

    #[test]
    fn test_multiline_message_stays_on_one_row() {
        let entry = LogEntry::new(
            vec![json!("a\nb"), json!("\ttab")],
            Timestamp::UNIX_EPOCH,
            "Auth",
            LogKind::Warn,
        );
        let rows = vec![Row::new(0, &entry)];

        insta::assert_snapshot!(TableLayout::default().format(&rows), @r"
        +-------+------------+----------------------+-----------+------+
        | index | message    | timestamp            | namespace | kind |
        +-------+------------+----------------------+-----------+------+
        | 0     | a\nb \ttab | 1970-01-01T00:00:00Z | Auth      | warn |
        +-------+------------+----------------------+-----------+------+
        ");
    }

    #[test]
    fn test_empty_table() {
        insta::assert_snapshot!(TableLayout::default().format(&[]), @r"
        +-------+---------+-----------+-----------+------+
        | index | message | timestamp | namespace | kind |
        +-------+---------+-----------+-----------+------+
        +-------+---------+-----------+-----------+------+
        ");
    }
}
