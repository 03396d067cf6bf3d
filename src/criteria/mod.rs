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

//! Emission policies deciding which entries reach the sink.

use std::fmt;
use std::sync::Arc;

use crate::LogEntry;

pub use self::env::DEFAULT_CRITERIA_ENV;
pub use self::env::EnvCriteria;

mod env;

type PredicateFn = dyn Fn(&LogEntry) -> bool + Send + Sync + 'static;

/// Decides whether a stored entry is also forwarded to the sink.
///
/// Entries are always stored; criteria only control output. The default is [`Criteria::Never`].
///
/// # Examples
///
/// ```
/// use konsole::Criteria;
/// use konsole::LogKind;
///
/// let errors_only = Criteria::predicate(|entry| entry.kind() == LogKind::Error);
/// let everything = Criteria::from(true);
/// ```
#[derive(Clone, Default)]
pub enum Criteria {
    /// Forward every entry.
    Always,
    /// Forward no entry.
    #[default]
    Never,
    /// Forward the entries the function accepts.
    Predicate(Arc<PredicateFn>),
}

impl fmt::Debug for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criteria::Always => write!(f, "Always"),
            Criteria::Never => write!(f, "Never"),
            Criteria::Predicate(_) => write!(f, "Predicate {{ ... }}"),
        }
    }
}

impl Criteria {
    /// Create criteria from a predicate over log entries.
    pub fn predicate(f: impl Fn(&LogEntry) -> bool + Send + Sync + 'static) -> Self {
        Criteria::Predicate(Arc::new(f))
    }

    /// Evaluate the criteria for one entry.
    ///
    /// A panicking predicate unwinds into the emitting caller.
    pub fn evaluate(&self, entry: &LogEntry) -> bool {
        match self {
            Criteria::Always => true,
            Criteria::Never => false,
            Criteria::Predicate(f) => f(entry),
        }
    }
}

impl From<bool> for Criteria {
    fn from(enabled: bool) -> Self {
        if enabled {
            Criteria::Always
        } else {
            Criteria::Never
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::LogKind;

    fn entry(kind: LogKind) -> LogEntry {
        LogEntry::new(vec![], Timestamp::UNIX_EPOCH, "Test", kind)
    }

    #[test]
    fn test_boolean_criteria() {
        assert!(Criteria::from(true).evaluate(&entry(LogKind::Log)));
        assert!(!Criteria::from(false).evaluate(&entry(LogKind::Error)));
        assert!(!Criteria::default().evaluate(&entry(LogKind::Info)));
    }

    #[test]
    fn test_predicate_criteria() {
        let criteria = Criteria::predicate(|entry| entry.kind() == LogKind::Warn);
        assert!(criteria.evaluate(&entry(LogKind::Warn)));
        assert!(!criteria.evaluate(&entry(LogKind::Log)));
        assert_eq!(format!("{criteria:?}"), "Predicate { ... }");
    }
}
