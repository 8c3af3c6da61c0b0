//! Merging of consecutive overlong full-line comments
//!
//! A run of full-line comments starting at an overlong one is flattened
//! into a single blob and rewrapped into a triple-quoted block at the
//! run's common (minimum) indentation.

use crate::config::Config;
use crate::format::{delimiter_block, indent_of, is_full_line_comment, skip_chars, wrap_text};

/// Merge the run of full-line comments starting at `start` into one
/// rewrapped block.
///
/// The driver only calls this where the starting line is an overlong
/// full-line comment; membership in the run itself is not length-gated,
/// so shorter comment lines are absorbed into a run once it has started.
///
/// Returns the replacement lines and the index of the first line past the
/// run, or `None` if no comment line is found at `start`.
pub fn merge_comment_run(
    lines: &[String],
    start: usize,
    config: &Config,
) -> Option<(Vec<String>, usize)> {
    // Forward scan: extend the run and track the minimum indent
    let mut end = start;
    let mut common_indent = usize::MAX;
    while end < lines.len() {
        let line = lines[end].trim_end_matches(['\n', '\r']);
        if !is_full_line_comment(line, config.comment_char) {
            break;
        }
        common_indent = common_indent.min(indent_of(line));
        end += 1;
    }
    if end == start {
        return None;
    }

    // Flatten: strip the common indent and a comment marker sitting
    // directly at it, then join the fragments with single spaces
    let mut merged = String::new();
    for raw in &lines[start..end] {
        let line = raw.trim_end_matches(['\n', '\r']);
        let mut content = skip_chars(line, common_indent);
        if let Some(rest) = content.strip_prefix(config.comment_char) {
            content = rest;
        }
        merged.push_str(content.trim_start());
        merged.push(' ');
    }

    let wrapped = wrap_text(
        merged.trim_end(),
        config.available_width(common_indent),
        &config.break_chars,
    );

    Some((
        delimiter_block(wrapped.trim_start(), common_indent, &config.block_delimiter),
        end,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| (*s).to_string()).collect()
    }

    fn long_comment(indent: usize) -> String {
        format!("{}# {}", " ".repeat(indent), "word ".repeat(20))
    }

    #[test]
    fn test_run_boundary() {
        let comment = long_comment(4);
        let input = lines(&[&comment[..], &comment[..], &comment[..], "x = 1"]);

        let (block, end) = merge_comment_run(&input, 0, &Config::default()).unwrap();
        // Resumes exactly at the code line
        assert_eq!(end, 3);
        assert_eq!(block.first().unwrap(), "    \"\"\"");
        assert_eq!(block.last().unwrap(), "    \"\"\"");
    }

    #[test]
    fn test_absorbs_short_comment_lines() {
        let input = lines(&[&long_comment(0)[..], "# short tail", "code()"]);

        let (block, end) = merge_comment_run(&input, 0, &Config::default()).unwrap();
        assert_eq!(end, 2);
        let body = block[1..block.len() - 1].join(" ");
        assert!(body.contains("short tail"));
    }

    #[test]
    fn test_common_indent_is_minimum() {
        let input = lines(&[&long_comment(8)[..], &long_comment(4)[..], "done"]);

        let (block, end) = merge_comment_run(&input, 0, &Config::default()).unwrap();
        assert_eq!(end, 2);
        for line in &block {
            assert!(line.starts_with("    "));
            assert!(!line.starts_with("     "));
        }
    }

    #[test]
    fn test_wrapped_lines_fit_at_indent() {
        let input = lines(&[&long_comment(4)[..], &long_comment(4)[..]]);

        let (block, _) = merge_comment_run(&input, 0, &Config::default()).unwrap();
        for line in &block {
            assert!(
                line.chars().count() <= 79,
                "line exceeds limit: {line:?}"
            );
        }
    }

    #[test]
    fn test_run_to_eof() {
        let input = lines(&[&long_comment(0)[..], &long_comment(0)[..]]);
        let (_, end) = merge_comment_run(&input, 0, &Config::default()).unwrap();
        assert_eq!(end, 2);
    }

    #[test]
    fn test_no_comment_at_start_declines() {
        let input = lines(&["x = 1"]);
        assert!(merge_comment_run(&input, 0, &Config::default()).is_none());
    }

    #[test]
    fn test_deeper_line_keeps_marker_text() {
        // A line indented deeper than the common indent has its marker
        // preserved inside the flattened text (only a marker directly at
        // the common indent is stripped)
        let input = lines(&[&long_comment(0)[..], "    # nested note"]);
        let (block, _) = merge_comment_run(&input, 0, &Config::default()).unwrap();
        let body = block[1..block.len() - 1].join(" ");
        assert!(body.contains("# nested note"));
    }
}
