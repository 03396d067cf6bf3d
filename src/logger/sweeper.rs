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

use std::io;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;
use crossbeam_channel::bounded;
use crossbeam_channel::select;
use crossbeam_channel::tick;

/// A guard over the background thread that runs retention sweeps.
///
/// The thread stops when the guard is stopped or dropped, or when the sweep function reports its
/// target is gone.
#[derive(Debug)]
pub(crate) struct Sweeper {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawn a thread calling `sweep` every `interval` until it returns `false`.
    pub(crate) fn spawn<F>(name: String, interval: Duration, sweep: F) -> io::Result<Sweeper>
    where
        F: Fn() -> bool + Send + 'static,
    {
        let (shutdown, shutdown_receiver) = bounded(0);
        let handle = std::thread::Builder::new()
            .name(name)
            .spawn(move || run(interval, shutdown_receiver, sweep))?;

        Ok(Sweeper {
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it to exit.
    pub(crate) fn stop(&mut self) {
        // disconnecting the channel wakes the thread up
        drop(self.shutdown.take());

        if let Some(handle) = self.handle.take() {
            // the last handle of a logger may be released by the sweep itself
            if handle.thread().id() != std::thread::current().id() {
                let _ = handle.join();
            }
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run<F>(interval: Duration, shutdown: Receiver<()>, sweep: F)
where
    F: Fn() -> bool,
{
    let ticker = tick(interval);
    loop {
        select! {
            recv(shutdown) -> _ => break,
            recv(ticker) -> _ => {
                if !sweep() {
                    break;
                }
            }
        }
    }
}
