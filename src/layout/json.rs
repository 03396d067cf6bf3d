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

use crate::Error;
use crate::Layout;
use crate::LogEntry;

/// A JSON layout for formatting log entries.
///
/// Output format:
///
/// ```json
/// {"timestamp":"2024-08-11T14:44:57.172051Z","namespace":"Auth","kind":"error","messages":["token expired",3600]}
/// ```
///
/// # Examples
///
/// ```
/// use konsole::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct JsonLayout {}

impl Layout for JsonLayout {
    fn format(&self, entry: &LogEntry) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(entry).map_err(Error::from_json_error)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use serde_json::json;

    use super::*;
    use crate::LogKind;

    #[test]
    fn test_json_line() {
        let entry = LogEntry::new(
            vec![json!("token expired"), json!(3600)],
            Timestamp::from_second(1723387497).unwrap(),
            "Auth",
            LogKind::Error,
        );

        let bytes = JsonLayout::default().format(&entry).unwrap();
        insta::assert_snapshot!(String::from_utf8(bytes).unwrap(), @r#"{"timestamp":"2024-08-11T14:44:57Z","namespace":"Auth","kind":"error","messages":["token expired",3600]}"#);
    }
}
