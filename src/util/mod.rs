//! Helpers shared by the storage, translation and CLI layers.

pub mod config;

use std::fmt::Write;

/// What: Escape text for a URL query component.
///
/// Inputs:
/// - `input`: Query value, e.g. a UI string sent for translation.
///
/// Output:
/// - `input` with every byte outside the RFC 3986 unreserved set written as `%XX`.
///
/// Details:
/// - Spaces become `%20`, never `+`; multi-byte UTF-8 characters are escaped per byte.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    input
        .bytes()
        .fold(String::with_capacity(input.len()), |mut out, b| {
            if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
                out.push(char::from(b));
            } else {
                let _ = write!(out, "%{b:02X}");
            }
            out
        })
}

/// What: Parse a stored boolean.
///
/// Inputs:
/// - `value`: Raw stored string.
///
/// Output:
/// - `Some(bool)` for `true/1/yes/on` or `false/0/no/off` (case-insensitive); `None` otherwise.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Local wall-clock timestamp used by the log formatter: `YYYY-MM-DD-T HH:MM:SS`.
#[must_use]
pub fn log_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string()
}
