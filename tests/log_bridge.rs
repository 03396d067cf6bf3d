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

use std::time::Duration;

use jiff::SignedDuration;
use jiff::Timestamp;
use konsole::Context;
use konsole::Konsole;
use konsole::LogKind;
use konsole::bridge::LogBridge;
use konsole::clock::ManualClock;
use log::LevelFilter;

#[test]
fn test_log_bridge_stores_records_and_skips_own_diagnostics() {
    let clock = ManualClock::new(Timestamp::UNIX_EPOCH);
    let context = Context::builder().no_sink().clock(clock.clone()).build();
    let sink = Konsole::builder("Bridge").build(&context);
    LogBridge::new(sink.clone())
        .apply(LevelFilter::Trace)
        .unwrap();

    log::error!("connection reset by {}", "peer");
    log::warn!(target: "app::db", "slow query");
    log::info!("ready");
    log::debug!("tick");
    log::trace!("tock");

    // evicting from another logger emits a diagnostic with target "konsole"
    let other = Konsole::builder("Other")
        .retention_period(Duration::from_secs(1))
        .cleanup_interval(Duration::ZERO)
        .build(&context);
    other.log(["old"]);
    clock.advance(SignedDuration::from_secs(5));
    assert_eq!(other.flush_old_logs(), 1);
    Konsole::builder("Other").build(&context);

    let logs = sink.get_logs();
    assert_eq!(
        logs.iter()
            .map(|entry| (entry.kind(), entry.message()))
            .collect::<Vec<_>>(),
        vec![
            (LogKind::Error, "connection reset by peer".to_string()),
            (LogKind::Warn, "slow query".to_string()),
            (LogKind::Info, "ready".to_string()),
            (LogKind::Log, "tick".to_string()),
            (LogKind::Log, "tock".to_string()),
        ]
    );
    assert!(logs.iter().all(|entry| entry.namespace() == "Bridge"));
}
