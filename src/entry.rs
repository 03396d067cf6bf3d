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

//! Stored log entries.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Value;

use crate::Error;

/// The kind of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// A plain message.
    Log,
    /// An error message.
    Error,
    /// A warning message.
    Warn,
    /// An informational message.
    Info,
}

impl LogKind {
    /// Return the lowercase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Log => "log",
            LogKind::Error => "error",
            LogKind::Warn => "warn",
            LogKind::Info => "info",
        }
    }

    /// Return the output channel entries of this kind are written to.
    pub fn channel(&self) -> Channel {
        match self {
            LogKind::Log => Channel::Standard,
            LogKind::Error => Channel::Error,
            LogKind::Warn => Channel::Warning,
            LogKind::Info => Channel::Info,
        }
    }

    /// Return the [`log::Level`] this kind corresponds to.
    ///
    /// Plain messages map to [`log::Level::Debug`].
    pub fn level(&self) -> log::Level {
        match self {
            LogKind::Log => log::Level::Debug,
            LogKind::Error => log::Level::Error,
            LogKind::Warn => log::Level::Warn,
            LogKind::Info => log::Level::Info,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(LogKind::Log),
            "error" => Ok(LogKind::Error),
            "warn" => Ok(LogKind::Warn),
            "info" => Ok(LogKind::Info),
            _ => Err(Error::new("unknown log kind").with_context("kind", s)),
        }
    }
}

/// An output channel of a [`Sink`](crate::Sink).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The standard channel, used for plain messages and notices.
    Standard,
    /// The informational channel.
    Info,
    /// The warning channel.
    Warning,
    /// The error channel.
    Error,
}

/// A single stored log entry.
///
/// Entries are created once per emission call and never change afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    timestamp: Timestamp,
    namespace: String,
    kind: LogKind,
    messages: Vec<Value>,
}

impl LogEntry {
    pub(crate) fn new(
        messages: Vec<Value>,
        timestamp: Timestamp,
        namespace: impl Into<String>,
        kind: LogKind,
    ) -> Self {
        Self {
            timestamp,
            namespace: namespace.into(),
            kind,
            messages,
        }
    }

    /// The logged values, in call order.
    pub fn messages(&self) -> &[Value] {
        &self.messages
    }

    /// The creation time of this entry.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The namespace of the logger that created this entry.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The kind of this entry.
    pub fn kind(&self) -> LogKind {
        self.kind
    }

    /// Render all messages as one line, joined by a single space.
    ///
    /// Strings are written verbatim; every other value is written as compact JSON.
    pub fn message(&self) -> String {
        join_messages(&self.messages)
    }
}

/// Render one logged value for display.
pub fn render_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

pub(crate) fn join_messages(messages: &[Value]) -> String {
    messages
        .iter()
        .map(render_value)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_message_rendering() {
        let entry = LogEntry::new(
            vec![
                json!("user"),
                json!(42),
                json!(true),
                json!(null),
                json!({"id": 7}),
                json!([1, "a"]),
            ],
            Timestamp::UNIX_EPOCH,
            "Auth",
            LogKind::Info,
        );

        assert_eq!(entry.message(), r#"user 42 true null {"id":7} [1,"a"]"#);
    }

    #[test]
    fn test_empty_messages_render_empty() {
        let entry = LogEntry::new(vec![], Timestamp::UNIX_EPOCH, "Auth", LogKind::Log);
        assert_eq!(entry.message(), "");
    }

    #[test]
    fn test_kind_routing() {
        assert_eq!(LogKind::Log.channel(), Channel::Standard);
        assert_eq!(LogKind::Error.channel(), Channel::Error);
        assert_eq!(LogKind::Warn.channel(), Channel::Warning);
        assert_eq!(LogKind::Info.channel(), Channel::Info);
    }

    #[test]
    fn test_kind_names() {
        for kind in [LogKind::Log, LogKind::Error, LogKind::Warn, LogKind::Info] {
            assert_eq!(kind.as_str().parse::<LogKind>().unwrap(), kind);
        }
        assert!("fatal".parse::<LogKind>().is_err());
    }

    #[test]
    fn test_entry_serialization() {
        let entry = LogEntry::new(
            vec![json!("boot"), json!(1)],
            Timestamp::UNIX_EPOCH,
            "App",
            LogKind::Warn,
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "timestamp": "1970-01-01T00:00:00Z",
                "namespace": "App",
                "kind": "warn",
                "messages": ["boot", 1],
            })
        );
    }
}
