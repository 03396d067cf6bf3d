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

//! The shared state loggers are created in.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use jiff::Timestamp;

use crate::Channel;
use crate::Clock;
use crate::Error;
use crate::Konsole;
use crate::LogEntry;
use crate::Row;
use crate::Sink;
use crate::Trap;
use crate::sink::Console;
use crate::trap::DefaultTrap;

mod registry;

pub use self::registry::Registry;

/// What loggers of one context share at runtime.
#[derive(Debug)]
pub(crate) struct Runtime {
    sink: Option<Box<dyn Sink>>,
    trap: Box<dyn Trap>,
    clock: Clock,
    global_print: AtomicBool,
}

impl Runtime {
    pub(crate) fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub(crate) fn global_print(&self) -> bool {
        self.global_print.load(Ordering::Relaxed)
    }

    pub(crate) fn trap(&self, err: &Error) {
        self.trap.trap(err);
    }

    pub(crate) fn emit(&self, entry: &LogEntry) {
        if let Some(sink) = &self.sink {
            if let Err(err) = sink.emit(entry) {
                self.trap(
                    &err.with_context("namespace", entry.namespace())
                        .with_context("kind", entry.kind()),
                );
            }
        }
    }

    pub(crate) fn notice(&self, channel: Channel, message: &str) {
        if let Some(sink) = &self.sink {
            if let Err(err) = sink.notice(channel, message) {
                self.trap(&err);
            }
        }
    }

    pub(crate) fn table(&self, rows: &[Row]) {
        if let Some(sink) = &self.sink {
            if let Err(err) = sink.table(rows) {
                self.trap(&err.with_context("rows", rows.len()));
            }
        }
    }
}

/// The registry, global print flag and host capabilities shared by a group of loggers.
///
/// Cloning a context is cheap and yields a handle to the same state.
///
/// # Examples
///
/// ```
/// use konsole::Context;
/// use konsole::Konsole;
///
/// let context = Context::builder().no_sink().build();
/// let logger = Konsole::builder("Auth").build(&context);
/// logger.info(["signed in"]);
///
/// assert_eq!(context.namespaces(), vec!["Auth"]);
/// assert_eq!(context.get_logger("Auth").len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Context {
    registry: Arc<Registry>,
    runtime: Arc<Runtime>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a context writing to the process console.
    pub fn new() -> Context {
        ContextBuilder::default().build()
    }

    /// Create a new [`ContextBuilder`].
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    pub(crate) fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    /// The namespace registry of this context.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn weak_registry(&self) -> std::sync::Weak<Registry> {
        Arc::downgrade(&self.registry)
    }

    /// Return the logger registered under `namespace`.
    ///
    /// On a miss, a warning notice is written and a logger with default options is created and
    /// registered under that namespace.
    pub fn get_logger(&self, namespace: &str) -> Konsole {
        if let Some(logger) = self.registry.lookup(namespace) {
            return logger;
        }

        self.runtime.notice(
            Channel::Warning,
            &format!("[Konsole] Logger with namespace \"{namespace}\" not found"),
        );
        Konsole::builder(namespace).build(self)
    }

    /// Snapshot of the registered namespaces, in registration order.
    pub fn namespaces(&self) -> Vec<String> {
        self.registry.namespaces()
    }

    /// Force every logger of this context to forward all entries, or stop doing so.
    pub fn enable_global_print(&self, enabled: bool) {
        self.runtime.global_print.store(enabled, Ordering::Relaxed);
    }

    /// Whether every logger of this context currently forwards all entries.
    pub fn is_global_print_enabled(&self) -> bool {
        self.runtime.global_print()
    }

    /// Destroy every registered logger and disable global print.
    ///
    /// Loggers held elsewhere keep their entries but stop sweeping.
    pub fn reset(&self) {
        for logger in self.registry.clear() {
            logger.stop_sweeper();
        }
        self.enable_global_print(false);
    }
}

/// A builder for configuring a [`Context`].
///
/// By default, the context writes to a [`Console`], reports sink errors with a [`DefaultTrap`]
/// and reads the system clock.
#[must_use = "call `build` to create the context"]
#[derive(Debug)]
pub struct ContextBuilder {
    sink: Option<Box<dyn Sink>>,
    trap: Box<dyn Trap>,
    clock: Clock,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self {
            sink: Some(Box::new(Console::default())),
            trap: Box::new(DefaultTrap::default()),
            clock: Clock::System,
        }
    }
}

impl ContextBuilder {
    /// Set the sink forwarded entries, notices and tables are written to.
    pub fn sink(mut self, sink: impl Into<Box<dyn Sink>>) -> Self {
        self.sink = Some(sink.into());
        self
    }

    /// Drop all output, for hosts that have nothing to write to.
    pub fn no_sink(mut self) -> Self {
        self.sink = None;
        self
    }

    /// Set the trap that receives sink errors.
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Set the clock entries are timestamped with.
    pub fn clock(mut self, clock: impl Into<Clock>) -> Self {
        self.clock = clock.into();
        self
    }

    /// Create the context.
    pub fn build(self) -> Context {
        Context {
            registry: Arc::new(Registry::default()),
            runtime: Arc::new(Runtime {
                sink: self.sink,
                trap: self.trap,
                clock: self.clock,
                global_print: AtomicBool::new(false),
            }),
        }
    }
}
