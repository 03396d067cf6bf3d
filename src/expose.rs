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

//! A restricted view of a [`Context`] for installing into host globals.

use std::num::NonZeroUsize;

use crate::Batch;
use crate::Context;
use crate::Konsole;
use crate::logger::DEFAULT_NAMESPACE;

/// The name the facade is installed under.
pub const FACADE_NAME: &str = "__Konsole";

/// A host environment offering a global namespace, such as a debugging console.
pub trait Host {
    /// Install `facade` under `name`.
    fn install(&self, name: &str, facade: Facade);
}

/// The operations exposed to a host: paging through a logger and toggling global print.
#[derive(Debug, Clone)]
pub struct Facade {
    context: Context,
}

impl Facade {
    /// Return the logger of `namespace`, or of `Global` when `None`.
    ///
    /// Creates the logger if it does not exist, like [`Context::get_logger`].
    pub fn get_logger(&self, namespace: Option<&str>) -> FacadeLogger {
        let logger = self
            .context
            .get_logger(namespace.unwrap_or(DEFAULT_NAMESPACE));
        FacadeLogger { logger }
    }

    /// The registered namespaces.
    pub fn list_loggers(&self) -> Vec<String> {
        self.context.namespaces()
    }

    /// Forward every entry of every logger.
    pub fn enable_all(&self) {
        self.context.enable_global_print(true);
    }

    /// Return to per-logger criteria.
    pub fn disable_all(&self) {
        self.context.enable_global_print(false);
    }
}

/// A logger seen through a [`Facade`]: it can only be paged through.
#[derive(Debug, Clone)]
pub struct FacadeLogger {
    logger: Konsole,
}

impl FacadeLogger {
    /// Display the next page; `None` or zero uses the logger's default batch size.
    pub fn view_logs(&self, batch_size: Option<usize>) -> Batch {
        match batch_size.and_then(NonZeroUsize::new) {
            Some(batch_size) => self.logger.view_logs_with(batch_size),
            None => self.logger.view_logs(),
        }
    }
}

impl Context {
    /// Create the facade of this context.
    pub fn facade(&self) -> Facade {
        Facade {
            context: self.clone(),
        }
    }

    /// Install the facade of this context into `host` under [`FACADE_NAME`].
    ///
    /// Does nothing when there is no host.
    pub fn expose_to(&self, host: Option<&dyn Host>) {
        if let Some(host) = host {
            host.install(FACADE_NAME, self.facade());
        }
    }
}
