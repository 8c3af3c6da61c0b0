//! Reflow of existing triple-quoted comment blocks
//!
//! The interior of a block is flattened into one blob and rewrapped so
//! that no line exceeds the limit at the block's indentation. A block
//! left open at end of file is closed there; this leniency is deliberate
//! (see DESIGN.md).

use crate::config::Config;
use crate::format::{delimiter_block, indent_of, wrap_text};

/// Reflow the triple-quoted block opening at `start`.
///
/// Content is everything after the opening delimiter on the first line,
/// then each following line wholesale, until a line containing the
/// delimiter closes the block (text before the delimiter on that line is
/// the final fragment). Reaching end of input without a closing delimiter
/// consumes through the end.
///
/// Returns the replacement lines and the index of the first unconsumed
/// line, or `None` if the opening line carries no delimiter at all
/// (defensive; the driver checks before calling).
pub fn reflow_block_comment(
    lines: &[String],
    start: usize,
    config: &Config,
) -> Option<(Vec<String>, usize)> {
    let delimiter = &config.block_delimiter;
    let first = lines[start].trim_end_matches(['\n', '\r']);
    let indent = indent_of(first);

    let open = first.find(delimiter.as_str())?;
    let mut content = String::new();
    let after = &first[open + delimiter.len()..];
    if !after.is_empty() {
        content.push_str(after);
        content.push(' ');
    }

    let mut i = start + 1;
    while i < lines.len() {
        let line = lines[i].trim_end_matches(['\n', '\r']);
        if let Some(close) = line.find(delimiter.as_str()) {
            let before = &line[..close];
            if !before.is_empty() {
                content.push_str(before);
                content.push(' ');
            }
            i += 1;
            break;
        }
        content.push_str(line);
        content.push(' ');
        i += 1;
    }

    let wrapped = wrap_text(
        &content,
        config.available_width(indent),
        &config.break_chars,
    );

    Some((
        delimiter_block(wrapped.trim_start(), indent, &config.block_delimiter),
        i,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_reflows_multiline_block() {
        let alpha = format!("    {}", "alpha ".repeat(20));
        let beta = format!("    {}", "beta ".repeat(20));
        let input = lines(&["    \"\"\"", &alpha[..], &beta[..], "    \"\"\"", "x = 1"]);

        let (block, end) = reflow_block_comment(&input, 0, &Config::default()).unwrap();
        assert_eq!(end, 4);
        assert_eq!(block.first().unwrap(), "    \"\"\"");
        assert_eq!(block.last().unwrap(), "    \"\"\"");
        for line in &block {
            assert!(line.chars().count() <= 79, "line too long: {line:?}");
        }
        let body = block[1..block.len() - 1].join(" ");
        assert!(body.contains("alpha"));
        assert!(body.contains("beta"));
    }

    #[test]
    fn test_content_on_opening_line() {
        let input = lines(&["\"\"\"summary of the block", "continues here", "\"\"\""]);

        let (block, end) = reflow_block_comment(&input, 0, &Config::default()).unwrap();
        assert_eq!(end, 3);
        assert_eq!(block[1], "summary of the block continues here");
    }

    #[test]
    fn test_content_before_closing_delimiter() {
        let input = lines(&["\"\"\"", "body text", "final words \"\"\""]);

        let (block, end) = reflow_block_comment(&input, 0, &Config::default()).unwrap();
        assert_eq!(end, 3);
        assert_eq!(block[1], "body text final words");
    }

    #[test]
    fn test_lenient_eof_without_close() {
        let input = lines(&["\"\"\"", "left open", "still going"]);

        let (block, end) = reflow_block_comment(&input, 0, &Config::default()).unwrap();
        // Consumed through EOF, block re-closed
        assert_eq!(end, 3);
        assert_eq!(block.last().unwrap(), "\"\"\"");
        assert_eq!(block[1], "left open still going");
    }

    #[test]
    fn test_one_line_block_swallows_following_lines() {
        // Only the first delimiter on the opening line is recognized; a
        // closing delimiter on the same line becomes interior text and
        // scanning runs on until a later delimiter or EOF
        let input = lines(&["\"\"\"all on one line\"\"\"", "x = 1"]);

        let (block, end) = reflow_block_comment(&input, 0, &Config::default()).unwrap();
        assert_eq!(end, 2);
        assert!(block[1].contains("all on one line\"\"\" x = 1"));
    }

    #[test]
    fn test_empty_block() {
        let input = lines(&["\"\"\"", "\"\"\""]);

        let (block, end) = reflow_block_comment(&input, 0, &Config::default()).unwrap();
        assert_eq!(end, 2);
        assert_eq!(block, vec!["\"\"\"", "\"\"\""]);
    }

    #[test]
    fn test_no_delimiter_declines() {
        let input = lines(&["# not a block"]);
        assert!(reflow_block_comment(&input, 0, &Config::default()).is_none());
    }
}
