//! Normalization of commented-out print statements
//!
//! An overlong full-line comment of the form `# print(...)` is uncommented,
//! run through the external formatter, and re-emitted as a triple-quoted
//! block at the original indentation.

use crate::config::Config;
use crate::format::{char_len, delimiter_block, indent_of};
use crate::formatter::CodeFormatter;

/// Rewrite a commented-out print statement into a formatted block.
///
/// Returns the replacement lines, or `None` when the rule declines:
/// - the line fits within the limit
/// - the line is not a full-line comment starting with the print prefix
/// - the text before the first comment marker is itself overlong
/// - the comment body starts with the excluded prefix (`def `)
/// - the external formatter fails (the original line is then preserved)
///
/// One input line may expand into many output lines.
pub fn normalize_commented_print(
    line: &str,
    config: &Config,
    formatter: &dyn CodeFormatter,
) -> Option<Vec<String>> {
    let line = line.trim_end_matches(['\n', '\r']);
    if char_len(line) <= config.line_length {
        return None;
    }

    let rest = line.trim_start().strip_prefix(config.comment_char)?;
    let content = rest.trim_start();
    if !content.starts_with(&config.print_prefix) {
        return None;
    }
    if content.starts_with(&config.skip_prefix) {
        return None;
    }

    // Guard against a marker buried deep inside an already-long prefix
    let marker_pos = line.find(config.comment_char)?;
    if line[..marker_pos].chars().count() >= config.line_length {
        return None;
    }

    let formatted = match formatter.format(content, config.line_length) {
        Ok(formatted) => formatted,
        Err(e) => {
            eprintln!("Warning: formatter failed, leaving line unchanged: {e}");
            return None;
        }
    };

    let formatted = formatted.trim_end_matches(['\n', '\r']);
    // Defensive cleanup: strip a leftover comment marker the formatter
    // may have handed back
    let formatted = match formatted.strip_prefix(config.comment_char) {
        Some(rest) => rest.trim_start(),
        None => formatted,
    };

    Some(delimiter_block(
        formatted,
        indent_of(line),
        &config.block_delimiter,
    ))
}
