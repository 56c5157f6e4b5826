//! Logging helpers for player-entered text (notes, memory moments, context inputs).
//! Escapes control characters so every log record stays on one line.

/// Default preview length for [`escape_log`].
pub const MAX_PREVIEW: usize = 120;

/// Escape a string for single-line logging, truncated to [`MAX_PREVIEW`] characters.
pub fn escape_log(s: &str) -> String {
    escape_log_with_limit(s, MAX_PREVIEW)
}

/// Escape `\n`, `\r`, `\t` and backslash; other control characters become `\xNN`.
/// Input longer than `max_chars` is cut and ends with an ellipsis.
pub fn escape_log_with_limit(s: &str, max_chars: usize) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len().min(max_chars) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= max_chars {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
