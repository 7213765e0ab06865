//! Validation of persisted values
//!
//! Stored data may be missing, hand-edited or written by an older build.
//! Nothing here fails: anything unusable becomes the default.

use serde_json::Value;

use crate::settings::Theme;
use crate::sim::Tally;
use crate::sim::rotation::FULL_TURN;

/// Parse a stored tally record (`{"heads": n, "tails": n}`)
pub fn parse_tally(raw: Option<&str>) -> Tally {
    let Some(raw) = raw else {
        return Tally::default();
    };
    let Ok(value) = serde_json::from_str::<Value>(raw) else {
        log::warn!("Stored tally is not valid JSON, resetting");
        return Tally::default();
    };

    Tally::new(count_field(&value, "heads"), count_field(&value, "tails"))
}

/// 2^64, the smallest float that no longer fits in a `u64`
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// A non-negative whole count, or 0 for anything else
fn count_field(value: &Value, key: &str) -> u64 {
    let Some(field) = value.get(key) else {
        return 0;
    };
    if let Some(n) = field.as_u64() {
        return n;
    }
    match field.as_f64() {
        // Whole floats such as `5.0` are fine; fractions and huge values are not
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n < U64_LIMIT => n as u64,
        _ => {
            log::warn!("Stored {key} count {field} is invalid, using 0");
            0
        }
    }
}

/// Parse a stored rotation, reduced to `[0, 360)`.
///
/// Reads an optional sign and the leading digits, ignoring any trailing
/// text (so `"540deg"` loads as 180). Arbitrarily long digit strings are
/// reduced digit by digit and never overflow.
pub fn parse_rotation(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut seen_digit = false;
    let mut angle = 0u32;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        angle = (angle * 10 + u32::from(b - b'0')) % FULL_TURN;
    }

    if !seen_digit {
        log::warn!("Stored rotation {raw:?} is not a number, using 0");
        return 0;
    }
    if negative && angle != 0 {
        FULL_TURN - angle
    } else {
        angle
    }
}

/// Parse a stored theme name, defaulting to dark
pub fn parse_theme(raw: Option<&str>) -> Theme {
    raw.and_then(Theme::from_str).unwrap_or_default()
}
