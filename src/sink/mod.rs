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

//! Output sinks that forwarded entries, notices and tables are written to.

use std::fmt;

use crate::Channel;
use crate::Error;
use crate::LogEntry;
use crate::Row;

mod capture;
mod stdio;

pub use self::capture::Capture;
pub use self::capture::Captured;
pub use self::stdio::Console;

/// The host output a [`Context`](crate::Context) writes through.
///
/// A context without a sink treats every output as a no-op.
pub trait Sink: fmt::Debug + Send + Sync + 'static {
    /// Write a forwarded entry to the channel of its kind.
    fn emit(&self, entry: &LogEntry) -> Result<(), Error>;

    /// Write a one-line diagnostic to the given channel.
    fn notice(&self, channel: Channel, message: &str) -> Result<(), Error>;

    /// Display a page of stored entries.
    fn table(&self, rows: &[Row]) -> Result<(), Error>;
}

impl<T: Sink> From<T> for Box<dyn Sink> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
