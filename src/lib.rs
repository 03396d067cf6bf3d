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

//! Konsole is a namespaced, in-memory logger: every emitted entry is kept, only some are printed.
//!
//! # Overview
//!
//! Loggers are created in a [`Context`], which owns the namespace registry, the global print
//! flag and the host capabilities (an output [`Sink`], a [`Trap`] for output errors and a
//! [`Clock`]). Each [`Konsole`] stores its entries, forwards those its [`Criteria`] accept to
//! the sink, sweeps entries older than its retention period in the background, and lets you page
//! through what it kept.
//!
//! # Examples
//!
//! ```
//! use std::num::NonZeroUsize;
//!
//! use konsole::Channel;
//! use konsole::Context;
//! use konsole::Konsole;
//! use konsole::LogKind;
//! use konsole::sink::Capture;
//!
//! let capture = Capture::default();
//! let context = Context::builder().sink(capture.clone()).build();
//!
//! // only errors are printed, everything is stored
//! let auth = Konsole::builder("Auth")
//!     .criteria(konsole::Criteria::predicate(|entry| entry.kind() == LogKind::Error))
//!     .default_batch_size(NonZeroUsize::new(2).unwrap())
//!     .build(&context);
//!
//! auth.info(["login attempt"]);
//! konsole::error!(auth, "login failed for", "alice");
//! assert_eq!(capture.lines_of(Channel::Error), vec!["[Auth] login failed for alice"]);
//! assert_eq!(auth.get_logs().len(), 2);
//!
//! // print everything from every logger of the context
//! context.enable_global_print(true);
//! auth.log(["now visible"]);
//! assert_eq!(capture.lines_of(Channel::Standard), vec!["[Auth] now visible"]);
//!
//! // page through the stored entries
//! assert_eq!(auth.view_logs().range(), Some(0..2));
//! assert_eq!(auth.view_logs().range(), Some(2..3));
//! assert!(auth.view_logs().is_exhausted());
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "bridge-log")]
pub mod bridge;
pub mod clock;
#[cfg(feature = "colored")]
pub mod color;
pub mod context;
pub mod criteria;
pub mod expose;
pub mod layout;
pub mod sink;
pub mod trap;

mod entry;
mod error;
mod logger;
mod macros;

pub use self::clock::Clock;
pub use self::context::Context;
pub use self::context::ContextBuilder;
pub use self::criteria::Criteria;
pub use self::entry::Channel;
pub use self::entry::LogEntry;
pub use self::entry::LogKind;
pub use self::entry::render_value;
pub use self::error::Error;
pub use self::layout::Layout;
pub use self::logger::*;
pub use self::sink::Sink;
pub use self::trap::Trap;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;

    /// Convert any serializable value into a logged message.
    ///
    /// Values that fail to serialize are logged as a placeholder string.
    pub fn to_message<T: serde::Serialize + ?Sized>(value: &T) -> Value {
        serde_json::to_value(value)
            .unwrap_or_else(|err| Value::String(format!("<unserializable: {err}>")))
    }
}
