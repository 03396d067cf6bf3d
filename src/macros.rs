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

/// Store a plain entry of any number of serializable values.
///
/// ```
/// use konsole::Context;
/// use konsole::Konsole;
///
/// let context = Context::builder().no_sink().build();
/// let logger = Konsole::new(&context);
/// konsole::log!(logger, "user", 42, vec!["a", "b"]);
///
/// assert_eq!(logger.get_logs()[0].message(), r#"user 42 ["a","b"]"#);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::__emit!($logger, $crate::LogKind::Log $(, $value)*)
    };
}

/// Store an error entry of any number of serializable values.
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::__emit!($logger, $crate::LogKind::Error $(, $value)*)
    };
}

/// Store a warning entry of any number of serializable values.
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::__emit!($logger, $crate::LogKind::Warn $(, $value)*)
    };
}

/// Store an info entry of any number of serializable values.
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $value:expr)* $(,)?) => {
        $crate::__emit!($logger, $crate::LogKind::Info $(, $value)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($logger:expr, $kind:expr $(, $value:expr)*) => {{
        let messages: ::std::vec::Vec<$crate::__private::Value> =
            ::std::vec![$($crate::__private::to_message(&$value)),*];
        $logger.emit($kind, messages)
    }};
}
