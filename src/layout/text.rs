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

use std::fmt::Write;

use crate::Error;
use crate::Layout;
use crate::LogEntry;
#[cfg(feature = "colored")]
use crate::color::KindColor;
use crate::entry::render_value;

/// A layout that formats a log entry as its namespace prefix followed by its messages.
///
/// Output format:
///
/// ```text
/// [Auth] login attempt {"user":"alice"}
/// [Auth] token expired 3600
/// ```
///
/// With the `colored` feature, the prefix is colored by kind unless [`TextLayout::no_color`] is
/// set.
///
/// # Examples
///
/// ```
/// use konsole::layout::TextLayout;
///
/// let text_layout = TextLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    #[cfg(feature = "colored")]
    colors: KindColor,
    no_color: bool,
}

impl TextLayout {
    /// Disables colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Customizes the color of each log kind.
    #[cfg(feature = "colored")]
    pub fn colors(mut self, colors: KindColor) -> Self {
        self.colors = colors;
        self
    }

    fn prefix(&self, entry: &LogEntry) -> String {
        let prefix = format!("[{}]", entry.namespace());

        #[cfg(feature = "colored")]
        {
            self.colors
                .colorize(self.no_color, entry.kind(), prefix)
                .to_string()
        }
        #[cfg(not(feature = "colored"))]
        {
            prefix
        }
    }
}

impl Layout for TextLayout {
    fn format(&self, entry: &LogEntry) -> Result<Vec<u8>, Error> {
        let mut text = self.prefix(entry);
        for value in entry.messages() {
            // SAFETY: write to a string always succeeds
            write!(&mut text, " {}", render_value(value)).unwrap();
        }
        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use serde_json::json;

    use super::*;
    use crate::LogKind;

    #[test]
    fn test_prefix_and_messages() {
        let entry = LogEntry::new(
            vec![json!("login attempt"), json!({"user": "alice"})],
            Timestamp::UNIX_EPOCH,
            "Auth",
            LogKind::Info,
        );

        let bytes = TextLayout::default().no_color().format(&entry).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[Auth] login attempt {"user":"alice"}"#
        );
    }

    #[test]
    fn test_no_messages() {
        let entry = LogEntry::new(vec![], Timestamp::UNIX_EPOCH, "App", LogKind::Log);
        let bytes = TextLayout::default().no_color().format(&entry).unwrap();
        assert_eq!(bytes, b"[App]");
    }
}
