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

use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::Konsole;

/// The namespace to logger mapping of a [`Context`](crate::Context).
///
/// Namespaces are unique and listed in registration order. Registering a namespace again
/// replaces the mapping in place; the replaced logger keeps working for anyone holding it.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Mutex<Vec<(String, Konsole)>>,
}

impl Registry {
    fn entries(&self) -> MutexGuard<'_, Vec<(String, Konsole)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Map `namespace` to `logger`, returning the logger it replaced, if any.
    pub fn register(&self, namespace: impl Into<String>, logger: Konsole) -> Option<Konsole> {
        let namespace = namespace.into();
        let mut entries = self.entries();
        match entries.iter_mut().find(|(ns, _)| *ns == namespace) {
            Some((_, existing)) => Some(std::mem::replace(existing, logger)),
            None => {
                entries.push((namespace, logger));
                None
            }
        }
    }

    /// Return the logger registered under `namespace`.
    pub fn lookup(&self, namespace: &str) -> Option<Konsole> {
        self.entries()
            .iter()
            .find(|(ns, _)| ns == namespace)
            .map(|(_, logger)| logger.clone())
    }

    /// Remove the mapping of `namespace`, if present.
    pub fn unregister(&self, namespace: &str) -> Option<Konsole> {
        let mut entries = self.entries();
        let pos = entries.iter().position(|(ns, _)| ns == namespace)?;
        Some(entries.remove(pos).1)
    }

    /// Remove the mapping of `namespace` only if it still points at `logger`.
    pub(crate) fn unregister_instance(&self, namespace: &str, logger: &Konsole) -> Option<Konsole> {
        let mut entries = self.entries();
        let pos = entries
            .iter()
            .position(|(ns, registered)| ns == namespace && registered.same_instance(logger))?;
        Some(entries.remove(pos).1)
    }

    /// Snapshot of the registered namespaces, in registration order.
    pub fn namespaces(&self) -> Vec<String> {
        self.entries().iter().map(|(ns, _)| ns.clone()).collect()
    }

    /// Remove every mapping, returning the removed loggers.
    pub(crate) fn clear(&self) -> Vec<Konsole> {
        self.entries()
            .drain(..)
            .map(|(_, logger)| logger)
            .collect()
    }
}
