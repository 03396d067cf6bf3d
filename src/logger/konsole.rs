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

use std::fmt;
use std::io;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::Weak;
use std::time::Duration;

use jiff::SignedDuration;
use jiff::Timestamp;
use serde_json::Value;

use super::batch::Batch;
use super::batch::Page;
use super::batch::Row;
use super::builder::KonsoleBuilder;
use super::sweeper::Sweeper;
use crate::Channel;
use crate::Context;
use crate::Criteria;
use crate::Error;
use crate::LogEntry;
use crate::LogKind;
use crate::context::Registry;
use crate::context::Runtime;

const NO_MORE_LOGS: &str = "[Konsole] No more logs.";
const END_OF_LOGS: &str = "[Konsole] End of logs. Call view_logs() again to restart.";

#[derive(Debug, Default)]
struct State {
    logs: Vec<Arc<LogEntry>>,
    // 0 <= cursor <= logs.len()
    cursor: usize,
}

#[derive(Debug)]
struct Inner {
    namespace: String,
    default_batch_size: NonZeroUsize,
    retention_period: Duration,
    criteria: RwLock<Criteria>,
    state: Mutex<State>,
    runtime: Arc<Runtime>,
    registry: Weak<Registry>,
    sweeper: Mutex<Option<Sweeper>>,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sweeper(&self) -> MutexGuard<'_, Option<Sweeper>> {
        self.sweeper.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn criteria(&self) -> Criteria {
        self.criteria
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn add_log(&self, kind: LogKind, messages: Vec<Value>) {
        let entry = Arc::new(LogEntry::new(
            messages,
            self.runtime.now(),
            self.namespace.as_str(),
            kind,
        ));
        self.state().logs.push(entry.clone());
        self.process_log(&entry);
    }

    // runs with no lock held, so predicates and sinks may log again
    fn process_log(&self, entry: &LogEntry) {
        let should_print = self.runtime.global_print() || self.criteria().evaluate(entry);
        if should_print {
            self.runtime.emit(entry);
        }
    }

    fn flush_old_logs(&self) -> usize {
        let cutoff = retention_cutoff(self.runtime.now(), self.retention_period);

        let (evicted, remaining) = {
            let mut state = self.state();
            let State { logs, cursor } = &mut *state;

            let seen = logs[..*cursor]
                .iter()
                .filter(|entry| entry.timestamp() <= cutoff)
                .count();
            let before = logs.len();
            logs.retain(|entry| entry.timestamp() > cutoff);
            *cursor -= seen;
            (before - logs.len(), logs.len())
        };

        if evicted > 0 {
            log::debug!(
                target: "konsole",
                "evicted {evicted} entries older than {cutoff} from {}, {remaining} remaining",
                self.namespace
            );
        }
        evicted
    }

    fn view_logs(&self, batch_size: NonZeroUsize) -> Batch {
        let batch = {
            let mut state = self.state();
            let len = state.logs.len();
            if state.cursor >= len {
                state.cursor = 0;
                Batch::Exhausted
            } else {
                let start = state.cursor;
                let end = start.saturating_add(batch_size.get()).min(len);
                let rows = state.logs[start..end]
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| Row::new(start + i, entry))
                    .collect();
                state.cursor = end;
                Batch::Page(Page {
                    start,
                    end,
                    rows,
                    last: end >= len,
                })
            }
        };

        match &batch {
            Batch::Exhausted => self.runtime.notice(Channel::Standard, NO_MORE_LOGS),
            Batch::Page(page) => {
                self.runtime.table(page.rows());
                if page.is_last() {
                    self.runtime.notice(Channel::Standard, END_OF_LOGS);
                }
            }
        }
        batch
    }
}

type SpawnSweeper = fn(String, Duration, Box<dyn Fn() -> bool + Send>) -> io::Result<Sweeper>;

// a logger whose sweeper cannot be spawned keeps working, swept only on demand
fn start_sweeper(inner: &Arc<Inner>, interval: Duration, spawn: SpawnSweeper) {
    let target = Arc::downgrade(inner);
    let sweeper = spawn(
        format!("konsole-sweeper-{}", inner.namespace),
        interval,
        Box::new(move || match target.upgrade() {
            Some(inner) => {
                inner.flush_old_logs();
                true
            }
            None => false,
        }),
    );
    match sweeper {
        Ok(sweeper) => *inner.sweeper() = Some(sweeper),
        Err(err) => inner.runtime.trap(
            &Error::new("failed to spawn the retention sweeper")
                .with_context("namespace", &inner.namespace)
                .with_source(err),
        ),
    }
}

fn retention_cutoff(now: Timestamp, retention_period: Duration) -> Timestamp {
    SignedDuration::try_from(retention_period)
        .ok()
        .and_then(|period| now.checked_sub(period).ok())
        .unwrap_or(Timestamp::MIN)
}

/// A namespaced, in-memory logger.
///
/// Every emitted entry is stored; it is also forwarded to the context's sink when the context's
/// global print flag is on or the logger's [`Criteria`] accept it. Stored entries older than the
/// retention period are swept in the background, and can be paged through with
/// [`view_logs`](Konsole::view_logs) or copied out with [`get_logs`](Konsole::get_logs).
///
/// `Konsole` is a cheap handle: clones refer to the same logger.
///
/// # Examples
///
/// ```
/// use konsole::Context;
/// use konsole::Konsole;
///
/// let context = Context::builder().no_sink().build();
/// let logger = Konsole::builder("App").build(&context);
///
/// logger.log(["started"]);
/// logger.error(["failed", "twice"]);
/// konsole::warn!(logger, "retrying in", 5, "seconds");
///
/// let logs = logger.get_logs();
/// assert_eq!(logs.len(), 3);
/// assert_eq!(logs[2].message(), "retrying in 5 seconds");
/// ```
#[derive(Clone)]
pub struct Konsole {
    inner: Arc<Inner>,
}

impl fmt::Debug for Konsole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Konsole")
            .field("namespace", &self.inner.namespace)
            .field("default_batch_size", &self.inner.default_batch_size)
            .field("retention_period", &self.inner.retention_period)
            .finish_non_exhaustive()
    }
}

impl Konsole {
    /// Create and register a logger with default options in the `Global` namespace.
    pub fn new(context: &Context) -> Konsole {
        KonsoleBuilder::default().build(context)
    }

    /// Create a new [`KonsoleBuilder`] for the given namespace.
    pub fn builder(namespace: impl Into<String>) -> KonsoleBuilder {
        KonsoleBuilder::new(namespace)
    }

    pub(crate) fn create(builder: KonsoleBuilder, context: &Context) -> Konsole {
        let KonsoleBuilder {
            namespace,
            criteria,
            default_batch_size,
            retention_period,
            cleanup_interval,
        } = builder;

        let inner = Arc::new(Inner {
            namespace,
            default_batch_size,
            retention_period,
            criteria: RwLock::new(criteria),
            state: Mutex::new(State::default()),
            runtime: context.runtime().clone(),
            registry: context.weak_registry(),
            sweeper: Mutex::new(None),
        });

        if !cleanup_interval.is_zero() {
            start_sweeper(&inner, cleanup_interval, Sweeper::spawn);
        }

        let logger = Konsole { inner };
        let replaced = context
            .registry()
            .register(logger.namespace(), logger.clone());
        if replaced.is_some() {
            log::debug!(
                target: "konsole",
                "replaced the registered logger of namespace {}",
                logger.namespace()
            );
        }
        logger
    }

    pub(crate) fn same_instance(&self, other: &Konsole) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// The namespace of this logger.
    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    /// The page size used by [`view_logs`](Konsole::view_logs).
    pub fn default_batch_size(&self) -> NonZeroUsize {
        self.inner.default_batch_size
    }

    /// The maximum age of a stored entry.
    pub fn retention_period(&self) -> Duration {
        self.inner.retention_period
    }

    /// Store a plain entry.
    pub fn log<I>(&self, messages: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.inner.add_log(LogKind::Log, collect(messages));
    }

    /// Store an error entry.
    pub fn error<I>(&self, messages: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.inner.add_log(LogKind::Error, collect(messages));
    }

    /// Store a warning entry.
    pub fn warn<I>(&self, messages: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.inner.add_log(LogKind::Warn, collect(messages));
    }

    /// Store an info entry.
    pub fn info<I>(&self, messages: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.inner.add_log(LogKind::Info, collect(messages));
    }

    /// Store an entry of the given kind.
    pub fn emit<I>(&self, kind: LogKind, messages: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.inner.add_log(kind, collect(messages));
    }

    /// Replace the criteria; the next emitted entry is checked against the new ones.
    pub fn set_criteria(&self, criteria: impl Into<Criteria>) {
        *self
            .inner
            .criteria
            .write()
            .unwrap_or_else(PoisonError::into_inner) = criteria.into();
    }

    /// Display the next page of [`default_batch_size`](Konsole::default_batch_size) entries.
    ///
    /// See [`view_logs_with`](Konsole::view_logs_with).
    pub fn view_logs(&self) -> Batch {
        self.inner.view_logs(self.inner.default_batch_size)
    }

    /// Display the next page of at most `batch_size` entries.
    ///
    /// Each call writes the page to the sink as a table and moves the cursor past it. Once the
    /// last entry has been shown an end-of-logs notice follows the table; the call after that
    /// returns [`Batch::Exhausted`] and rewinds the cursor to the first entry.
    pub fn view_logs_with(&self, batch_size: NonZeroUsize) -> Batch {
        self.inner.view_logs(batch_size)
    }

    /// Rewind the page cursor to the first entry.
    pub fn reset_batch(&self) {
        self.inner.state().cursor = 0;
    }

    /// Snapshot of all stored entries, oldest first.
    pub fn get_logs(&self) -> Vec<Arc<LogEntry>> {
        self.inner.state().logs.clone()
    }

    /// The number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.state().logs.len()
    }

    /// Whether no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.state().logs.is_empty()
    }

    /// Remove all stored entries and rewind the page cursor.
    pub fn clear_logs(&self) {
        let mut state = self.inner.state();
        state.logs.clear();
        state.cursor = 0;
    }

    /// Remove every entry at least as old as the retention period, returning how many were
    /// removed.
    ///
    /// The background sweeper calls this every cleanup interval.
    pub fn flush_old_logs(&self) -> usize {
        self.inner.flush_old_logs()
    }

    /// Serialize all stored entries as a JSON array.
    pub fn export_json(&self) -> Result<String, Error> {
        let logs = self.get_logs();
        let entries = logs.iter().map(|entry| &**entry).collect::<Vec<&LogEntry>>();
        serde_json::to_string(&entries).map_err(|err| {
            Error::from_json_error(err).with_context("namespace", self.namespace())
        })
    }

    pub(crate) fn stop_sweeper(&self) {
        let sweeper = self.inner.sweeper().take();
        if let Some(mut sweeper) = sweeper {
            sweeper.stop();
            log::debug!(target: "konsole", "stopped the sweeper of {}", self.namespace());
        }
    }

    /// Stop the background sweep and unregister this logger.
    ///
    /// The logger and its entries stay usable through this and any other handle, but it is no
    /// longer found by namespace and no longer swept automatically. Destroying twice is a no-op.
    pub fn destroy(&self) {
        self.stop_sweeper();
        if let Some(registry) = self.inner.registry.upgrade() {
            registry.unregister_instance(self.namespace(), self);
        }
    }
}

fn collect<I>(messages: I) -> Vec<Value>
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    messages.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::Trap;

    #[derive(Debug, Clone, Default)]
    struct RecordingTrap {
        errors: Arc<Mutex<Vec<String>>>,
    }

    impl Trap for RecordingTrap {
        fn trap(&self, err: &Error) {
            self.errors.lock().unwrap().push(err.to_string());
        }
    }

    #[test]
    fn test_sweeper_spawn_failure_is_trapped() {
        let trap = RecordingTrap::default();
        let context = Context::builder().no_sink().trap(trap.clone()).build();
        let logger = Konsole::builder("App")
            .retention_period(Duration::from_secs(1))
            .cleanup_interval(Duration::ZERO)
            .build(&context);

        start_sweeper(&logger.inner, Duration::from_millis(1), |_, _, _| {
            Err(io::Error::other("no threads left"))
        });

        assert!(logger.inner.sweeper().is_none());
        let errors = trap.errors.lock().unwrap().clone();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with(
            "failed to spawn the retention sweeper, context: { namespace: App }"
        ));
        assert!(errors[0].contains("no threads left"));

        // swept on demand only
        logger.log(["x"]);
        assert_eq!(logger.len(), 1);
        assert_eq!(logger.flush_old_logs(), 0);
        logger.destroy();
    }

    #[test]
    fn test_sweeper_is_attached() {
        let context = Context::builder().no_sink().build();
        let logger = Konsole::builder("App")
            .cleanup_interval(Duration::from_secs(60))
            .build(&context);
        assert!(logger.inner.sweeper().is_some());

        logger.destroy();
        assert!(logger.inner.sweeper().is_none());
    }
}
