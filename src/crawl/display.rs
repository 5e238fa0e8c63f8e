//! Display shortening for log lines.

const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_chars` characters with a middle ellipsis.
///
/// Both ends are kept so the host and the filename stay recognizable. The
/// head gets the extra character when the remaining budget is odd.
#[must_use]
pub fn truncate_middle(text: &str, max_chars: usize) -> String {
    let length = text.chars().count();
    if length <= max_chars {
        return text.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        return text.chars().take(max_chars).collect();
    }

    let budget = max_chars - ELLIPSIS.len();
    let tail_len = budget / 2;
    let head_len = budget - tail_len;
    let head: String = text.chars().take(head_len).collect();
    let tail: String = text.chars().skip(length - tail_len).collect();
    format!("{head}{ELLIPSIS}{tail}")
}
