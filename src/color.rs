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

//! Color utilities.

use colored::Color;
use colored::ColoredString;
use colored::Colorize;

use crate::LogKind;

/// Colors for different log kinds.
#[derive(Debug, Clone)]
pub struct KindColor {
    /// Color for plain log entries.
    pub log: Color,
    /// Color for error entries.
    pub error: Color,
    /// Color for warning entries.
    pub warn: Color,
    /// Color for info entries.
    pub info: Color,
}

impl Default for KindColor {
    fn default() -> Self {
        Self {
            log: Color::White,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Green,
        }
    }
}

impl KindColor {
    /// Colorize text in the color of the given kind.
    pub fn colorize(&self, no_color: bool, kind: LogKind, text: String) -> ColoredString {
        if no_color {
            ColoredString::from(text)
        } else {
            let color = match kind {
                LogKind::Log => self.log,
                LogKind::Error => self.error,
                LogKind::Warn => self.warn,
                LogKind::Info => self.info,
            };
            ColoredString::from(text).color(color)
        }
    }
}
