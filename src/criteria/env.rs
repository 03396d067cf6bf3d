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

//! Provides [`env_filter`](https://crates.io/crates/env_filter) based criteria.

use std::borrow::Cow;
use std::str::FromStr;

use log::Metadata;

use crate::Criteria;
use crate::Error;
use crate::LogEntry;

/// The default environment variable for criteria directives.
pub const DEFAULT_CRITERIA_ENV: &str = "KONSOLE_LOG";

/// Criteria made of one or more comma-separated directives.
///
/// The directive syntax is that of [`env_logger`](https://docs.rs/env_logger/#enabling-logging).
/// The namespace of an entry is matched as the target, and its kind as the level: `error`,
/// `warn` and `info` map to the levels of the same name, plain `log` entries map to `debug`.
///
/// ```
/// use konsole::criteria::EnvCriteria;
///
/// // errors everywhere, everything from "Auth"
/// let criteria = EnvCriteria::from("error,Auth=debug");
/// ```
#[derive(Debug)]
pub struct EnvCriteria(env_filter::Filter);

impl EnvCriteria {
    /// Initializes the criteria from the environment using default variable name `KONSOLE_LOG`.
    ///
    /// Accepts nothing when the variable is not set.
    pub fn from_default_env() -> Self {
        EnvCriteria::from_env(DEFAULT_CRITERIA_ENV)
    }

    /// Initializes the criteria from the environment using default variable name `KONSOLE_LOG`.
    /// If the variable is not set, the default value will be used.
    pub fn from_default_env_or<'a, V>(default: V) -> Self
    where
        V: Into<Cow<'a, str>>,
    {
        EnvCriteria::from_env_or(DEFAULT_CRITERIA_ENV, default)
    }

    /// Initializes the criteria from the environment using specific variable name.
    pub fn from_env<'a, E>(name: E) -> Self
    where
        E: Into<Cow<'a, str>>,
    {
        EnvCriteria::from_env_or(name, "off")
    }

    /// Initializes the criteria from the environment using specific variable name.
    /// If the variable is not set, the default value will be used.
    pub fn from_env_or<'a, 'b, E, V>(name: E, default: V) -> Self
    where
        E: Into<Cow<'a, str>>,
        V: Into<Cow<'b, str>>,
    {
        let name = name.into();
        let directives = match std::env::var(&*name) {
            Ok(s) => Cow::Owned(s),
            Err(_) => default.into(),
        };
        EnvCriteria::from(&*directives)
    }

    /// Whether an entry matches the directives.
    pub fn accepts(&self, entry: &LogEntry) -> bool {
        let metadata = Metadata::builder()
            .level(entry.kind().level())
            .target(entry.namespace())
            .build();
        self.0.enabled(&metadata)
    }
}

impl<'a> From<&'a str> for EnvCriteria {
    fn from(directives: &'a str) -> Self {
        EnvCriteria(env_filter::Builder::new().parse(directives).build())
    }
}

impl FromStr for EnvCriteria {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = env_filter::Builder::new();
        builder.try_parse(s).map_err(|err| {
            Error::new("failed to parse criteria directives")
                .with_context("directives", s)
                .with_source(err)
        })?;
        Ok(EnvCriteria(builder.build()))
    }
}

impl From<EnvCriteria> for Criteria {
    fn from(criteria: EnvCriteria) -> Self {
        Criteria::predicate(move |entry| criteria.accepts(entry))
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::LogKind;

    fn entry(namespace: &str, kind: LogKind) -> LogEntry {
        LogEntry::new(vec![], Timestamp::UNIX_EPOCH, namespace, kind)
    }

    #[test]
    fn test_directives_match_namespace_and_kind() {
        let criteria = EnvCriteria::from("error,Auth=debug");

        assert!(criteria.accepts(&entry("App", LogKind::Error)));
        assert!(!criteria.accepts(&entry("App", LogKind::Warn)));
        assert!(criteria.accepts(&entry("Auth", LogKind::Log)));
        assert!(criteria.accepts(&entry("Auth", LogKind::Info)));
    }

    #[test]
    fn test_unset_env_accepts_nothing() {
        let criteria = EnvCriteria::from_env("KONSOLE_TEST_CRITERIA_NEVER_SET");
        assert!(!criteria.accepts(&entry("App", LogKind::Error)));
    }

    #[test]
    fn test_unset_env_falls_back_to_default() {
        let criteria = EnvCriteria::from_env_or("KONSOLE_TEST_CRITERIA_NEVER_SET", "warn");
        assert!(criteria.accepts(&entry("App", LogKind::Warn)));
        assert!(!criteria.accepts(&entry("App", LogKind::Info)));
    }

    #[test]
    fn test_invalid_directives() {
        assert!("App=notalevel".parse::<EnvCriteria>().is_err());
    }

    #[test]
    fn test_into_criteria() {
        let criteria = Criteria::from(EnvCriteria::from("info"));
        assert!(criteria.evaluate(&entry("App", LogKind::Info)));
        assert!(!criteria.evaluate(&entry("App", LogKind::Log)));
    }
}
