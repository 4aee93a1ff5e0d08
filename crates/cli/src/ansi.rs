// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ANSI escape stripping.
//!
//! Test runners colorize assertion messages and stacks. Those escapes would
//! show up as garbage in HTML and webhook payloads, so error text is filtered
//! before it is stored.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// CSI / OSC escape sequences, including the single-byte 0x9B introducer.
#[allow(clippy::expect_used)]
static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[\x1B\x{9B}][\[\]()#;?]*(?:",
        r"(?:(?:(?:;[-a-zA-Z\d/#&.:=?%@~_]+)*|[a-zA-Z\d]+(?:;[-a-zA-Z\d/#&.:=?%@~_]*)*)?\x07)",
        r"|(?:(?:\d{1,4}(?:;\d{0,4})*)?[\dA-PR-TZcf-nq-uy=><~])",
        r")",
    ))
    .expect("valid regex")
});

/// Remove ANSI escape sequences from `text`.
///
/// Borrows when nothing needs removing.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_RE.replace_all(text, "")
}

/// Strip an optional error field, passing `None` through untouched.
pub fn strip_ansi_opt(text: Option<String>) -> Option<String> {
    text.map(|t| match strip_ansi(&t) {
        Cow::Borrowed(_) => t,
        Cow::Owned(stripped) => stripped,
    })
}

#[cfg(test)]
#[path = "ansi_tests.rs"]
mod tests;
