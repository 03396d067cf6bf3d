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

use log::LevelFilter;
use log::Metadata;
use log::Record;
use serde_json::Value;

use crate::Konsole;
use crate::LogKind;

/// The target of this crate's own diagnostics.
const INTERNAL_TARGET: &str = "konsole";

/// A [`log::Log`] implementation that stores records of the `log` crate in a [`Konsole`].
///
/// `Error`, `Warn` and `Info` records become entries of the same kind, `Debug` and `Trace`
/// records become plain entries. The formatted message is the only logged value.
///
/// Records of this crate's own diagnostics are skipped, so the bridge never feeds itself.
///
/// # Examples
///
/// ```
/// use konsole::Context;
/// use konsole::Konsole;
/// use konsole::bridge::LogBridge;
/// use log::LevelFilter;
///
/// let context = Context::new();
/// let logger = Konsole::builder("App").build(&context);
/// LogBridge::new(logger).apply(LevelFilter::Info).unwrap();
///
/// log::info!("captured");
/// ```
#[derive(Debug)]
pub struct LogBridge {
    logger: Konsole,
}

impl LogBridge {
    /// Create a bridge storing records in `logger`.
    pub fn new(logger: Konsole) -> Self {
        Self { logger }
    }

    /// Set up the global logger of the `log` crate with this bridge.
    ///
    /// # Errors
    ///
    /// An error is returned if the global logger has already been set.
    pub fn apply(self, max_level: LevelFilter) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

fn is_internal(target: &str) -> bool {
    target == INTERNAL_TARGET || target.starts_with("konsole::")
}

fn kind_of(level: log::Level) -> LogKind {
    match level {
        log::Level::Error => LogKind::Error,
        log::Level::Warn => LogKind::Warn,
        log::Level::Info => LogKind::Info,
        log::Level::Debug | log::Level::Trace => LogKind::Log,
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        !is_internal(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = Value::String(record.args().to_string());
        self.logger.emit(kind_of(record.level()), [message]);
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Context;

    #[test]
    fn test_records_become_entries() {
        let context = Context::builder().no_sink().build();
        let bridge = LogBridge::new(Konsole::builder("App").build(&context));

        log::Log::log(
            &bridge,
            &Record::builder()
                .args(format_args!("disk {} full", "/var"))
                .level(log::Level::Warn)
                .target("app::storage")
                .build(),
        );
        log::Log::log(
            &bridge,
            &Record::builder()
                .args(format_args!("tick"))
                .level(log::Level::Trace)
                .target("app")
                .build(),
        );

        let logs = context.get_logger("App").get_logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].kind(), LogKind::Warn);
        assert_eq!(logs[0].message(), "disk /var full");
        assert_eq!(logs[1].kind(), LogKind::Log);
    }

    #[test]
    fn test_internal_records_are_skipped() {
        let context = Context::builder().no_sink().build();
        let logger = Konsole::builder("App").build(&context);
        let bridge = LogBridge::new(logger.clone());

        log::Log::log(
            &bridge,
            &Record::builder()
                .args(format_args!("evicted 3 entries"))
                .level(log::Level::Debug)
                .target("konsole")
                .build(),
        );
        assert!(logger.is_empty());
        assert!(log::Log::enabled(
            &bridge,
            &Metadata::builder().target("konsole_app").build()
        ));
    }
}
