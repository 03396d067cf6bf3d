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

mod batch;
mod builder;
#[allow(clippy::module_inception)]
mod konsole;
mod sweeper;

pub use self::batch::Batch;
pub use self::batch::Page;
pub use self::batch::Row;
pub use self::builder::DEFAULT_BATCH_SIZE;
pub use self::builder::DEFAULT_CLEANUP_INTERVAL;
pub use self::builder::DEFAULT_NAMESPACE;
pub use self::builder::DEFAULT_RETENTION_PERIOD;
pub use self::builder::KonsoleBuilder;
pub use self::konsole::Konsole;
