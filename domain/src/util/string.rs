//! String helpers for rendering answers in logs and evidence listings.

/// Collapse an answer onto one line and cap it at `max_chars` characters.
///
/// Truncation happens on character boundaries; a trailing `...` marks a cut.
pub fn one_line_preview(s: &str, max_chars: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = flat.chars().take(keep).collect();
    out.push_str("...");
    out
}
