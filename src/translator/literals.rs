//! Literal formatting shared by dialects.

use chrono::TimeDelta;
use std::fmt::Write;

use crate::error::{SqlDomError, SqlDomResult};

/// `'text'` with embedded quotes doubled.
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Uppercase hex digits without a prefix.
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02X}");
    }
    out
}

/// Format a finite float. NaN and infinities have no portable spelling.
pub fn finite_float(value: f64) -> SqlDomResult<String> {
    if value.is_finite() {
        let text = value.to_string();
        // `1e300` prints as a long integer; keep it a float literal
        if text.contains(['.', 'e', 'E']) {
            Ok(text)
        } else {
            Ok(format!("{text}.0"))
        }
    } else {
        Err(SqlDomError::not_supported(format!("floating point value {value}")))
    }
}

/// Day-to-second interval body: `[-]D HH:MM:SS.fff`.
pub fn day_to_second(span: TimeDelta) -> String {
    let negative = span < TimeDelta::zero();
    let total_ms = span.num_milliseconds().unsigned_abs();
    let days = total_ms / 86_400_000;
    let hours = total_ms / 3_600_000 % 24;
    let minutes = total_ms / 60_000 % 60;
    let seconds = total_ms / 1_000 % 60;
    let millis = total_ms % 1_000;
    format!(
        "{}{} {:02}:{:02}:{:02}.{:03}",
        if negative { "-" } else { "" },
        days,
        hours,
        minutes,
        seconds,
        millis
    )
}
