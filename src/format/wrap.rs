//! Greedy text wrapping for comment reflow
//!
//! Implements the break-character-aware wrapper used when rebuilding
//! merged comment blocks. Cuts happen at the last break character at or
//! before the width limit, with a bounded forward search (up to 9 columns
//! of overflow) before falling back to a hard cut mid-token.

/// How far past `max_width` the forward search may look for a break
/// character before giving up and hard-cutting.
const FORWARD_SEARCH_SPAN: usize = 10;

/// Wrap `text` into segments of at most `max_width` characters, joined
/// with newlines.
///
/// Break characters are consumed at the cut point (together with any
/// whitespace that follows them) rather than carried into the next
/// segment. A segment may exceed `max_width` by up to
/// `FORWARD_SEARCH_SPAN - 1` characters when no break character exists
/// before the limit, and a single unbreakable token longer than that is
/// hard-cut exactly at `max_width`.
///
/// # Arguments
/// * `text` - A single line of text with no embedded newlines
/// * `max_width` - Maximum segment width in characters (clamped to >= 1)
/// * `break_chars` - Characters at which cutting is allowed
#[must_use]
pub fn wrap_text(text: &str, max_width: usize, break_chars: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let max_width = max_width.max(1);

    let mut segments: Vec<String> = Vec::new();
    let mut start = 0;

    while chars.len() - start > max_width {
        let limit = start + max_width;

        // Search backward from the limit for a break character
        let mut cut = None;
        for i in (start..=limit).rev() {
            if break_chars.contains(chars[i]) {
                cut = Some(i);
                break;
            }
        }

        // No break before the limit: search a short distance forward so a
        // token straddling the limit is not cut mid-word
        if cut.is_none() {
            let forward_end = (limit + FORWARD_SEARCH_SPAN).min(chars.len());
            for i in (limit + 1)..forward_end {
                if break_chars.contains(chars[i]) {
                    cut = Some(i);
                    break;
                }
            }
        }

        // Still nothing: hard cut at the limit
        let cut = cut.unwrap_or(limit);
        segments.push(chars[start..cut].iter().collect());

        // Consume the break character(s) and any following whitespace.
        // A hard cut lands on a non-break character, so `next` stays at
        // `cut`, which is already past the emitted segment.
        let mut next = cut;
        while next < chars.len() && break_chars.contains(chars[next]) {
            next += 1;
        }
        while next < chars.len() && chars[next].is_whitespace() {
            next += 1;
        }
        start = next;
    }

    segments.push(chars[start..].iter().collect());
    segments.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAK_CHARS: &str = " ,.:;";

    #[test]
    fn test_short_input_unchanged() {
        assert_eq!(wrap_text("hello world", 79, BREAK_CHARS), "hello world");
        assert_eq!(wrap_text("x", 1, BREAK_CHARS), "x");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(wrap_text("", 79, BREAK_CHARS), "");
    }

    #[test]
    fn test_wraps_at_space() {
        let text = "aaaa bbbb cccc dddd";
        let wrapped = wrap_text(text, 10, BREAK_CHARS);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines[0], "aaaa bbbb");
        // The space at the cut is consumed, not carried over
        assert!(lines.iter().all(|l| !l.starts_with(' ')));
    }

    #[test]
    fn test_no_overflow_with_break_chars() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let wrapped = wrap_text(text, 20, BREAK_CHARS);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 20, "line too long: {line:?}");
        }
    }

    #[test]
    fn test_forward_search_allows_bounded_overflow() {
        // No break char within the first 10 columns, but a comma shortly
        // after: the cut lands on the comma instead of mid-token
        let text = "abcdefghijklm,rest of the text";
        let wrapped = wrap_text(text, 10, BREAK_CHARS);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines[0], "abcdefghijklm");
    }

    #[test]
    fn test_hard_cut_unbreakable_token() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let wrapped = wrap_text(text, 10, BREAK_CHARS);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines[0], "abcdefghij");
        assert_eq!(lines[0].len(), 10);
    }

    #[test]
    fn test_content_preserved() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let wrapped = wrap_text(text, 15, BREAK_CHARS);
        let original: Vec<&str> = text.split_whitespace().collect();
        let rewrapped: Vec<&str> = wrapped.split_whitespace().collect();
        assert_eq!(original, rewrapped);
    }

    #[test]
    fn test_consumes_whitespace_after_break() {
        let text = "aaaa,    bbbb cccc dddd eeee";
        let wrapped = wrap_text(text, 5, BREAK_CHARS);
        let lines: Vec<&str> = wrapped.lines().collect();
        // The rightmost break within the limit is the space after the
        // comma; the run of spaces is consumed before the next segment
        assert_eq!(lines[0], "aaaa,");
        assert_eq!(lines[1], "bbbb");
    }

    #[test]
    fn test_pathological_width_terminates() {
        // Width below 1 is clamped; a long unbreakable token must still
        // terminate rather than loop
        let text = "x".repeat(500);
        let wrapped = wrap_text(&text, 0, BREAK_CHARS);
        assert_eq!(wrapped.lines().count(), 500);
    }

    #[test]
    fn test_multibyte_input_no_panic() {
        let text = "héllo wörld with some non-ascii content that is fairly long indeed";
        let wrapped = wrap_text(text, 20, BREAK_CHARS);
        assert!(wrapped.lines().count() > 1);
    }
}
