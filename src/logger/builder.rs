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

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::Context;
use crate::Criteria;
use crate::Konsole;

/// The namespace of loggers built without one.
pub const DEFAULT_NAMESPACE: &str = "Global";

/// The page size of [`Konsole::view_logs`] unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// How long entries are kept unless configured otherwise.
pub const DEFAULT_RETENTION_PERIOD: Duration = Duration::from_secs(48 * 60 * 60);

/// How often expired entries are swept unless configured otherwise.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// A builder for configuring a [`Konsole`].
///
/// ## Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use std::time::Duration;
///
/// use konsole::Context;
/// use konsole::Konsole;
///
/// let context = Context::new();
/// let logger = Konsole::builder("Auth")
///     .criteria(true)
///     .default_batch_size(NonZeroUsize::new(20).unwrap())
///     .retention_period(Duration::from_secs(60 * 60))
///     .cleanup_interval(Duration::from_secs(5 * 60))
///     .build(&context);
/// ```
#[must_use = "call `build` to create and register the logger"]
#[derive(Debug)]
pub struct KonsoleBuilder {
    pub(crate) namespace: String,
    pub(crate) criteria: Criteria,
    pub(crate) default_batch_size: NonZeroUsize,
    pub(crate) retention_period: Duration,
    pub(crate) cleanup_interval: Duration,
}

impl Default for KonsoleBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl KonsoleBuilder {
    /// Create a new builder for the given namespace.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            criteria: Criteria::Never,
            default_batch_size: DEFAULT_BATCH_SIZE,
            retention_period: DEFAULT_RETENTION_PERIOD,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }

    /// Set the criteria deciding which entries are forwarded to the sink.
    pub fn criteria(mut self, criteria: impl Into<Criteria>) -> Self {
        self.criteria = criteria.into();
        self
    }

    /// Set the page size used by [`Konsole::view_logs`].
    pub fn default_batch_size(mut self, default_batch_size: NonZeroUsize) -> Self {
        self.default_batch_size = default_batch_size;
        self
    }

    /// Set the maximum age an entry may reach before it is swept.
    pub fn retention_period(mut self, retention_period: Duration) -> Self {
        self.retention_period = retention_period;
        self
    }

    /// Set the period of the background sweep.
    ///
    /// A zero interval disables the background sweep; expired entries are then only removed by
    /// [`Konsole::flush_old_logs`].
    pub fn cleanup_interval(mut self, cleanup_interval: Duration) -> Self {
        self.cleanup_interval = cleanup_interval;
        self
    }

    /// Create the logger, start its sweeper and register it in `context`.
    ///
    /// A logger already registered under the same namespace is replaced but keeps working for
    /// anyone holding it.
    pub fn build(self, context: &Context) -> Konsole {
        Konsole::create(self, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let context = Context::builder().no_sink().build();
        let logger = Konsole::new(&context);

        assert_eq!(logger.namespace(), "Global");
        assert_eq!(logger.default_batch_size().get(), 100);
        assert_eq!(logger.retention_period(), Duration::from_secs(172_800));
        assert_eq!(context.namespaces(), vec!["Global"]);
        logger.destroy();
    }
}
