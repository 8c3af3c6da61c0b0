//! Splitting of overlong lines with trailing inline comments
//!
//! Moves the comment onto its own line above the code. A single split
//! only: neither resulting line is wrapped further even if still long.

use crate::config::Config;
use crate::format::{char_len, indent_of};

/// Split a line at its first comment marker into a comment line and a
/// code line.
///
/// Declines when the line fits within the limit, contains no marker, or
/// is a full-line comment (those belong to the comment-run merger).
///
/// Returns `(comment_line, code_line)`; the comment line carries the
/// original indentation, the code line is the original prefix verbatim
/// (trailing-trimmed).
pub fn split_inline_comment(line: &str, config: &Config) -> Option<(String, String)> {
    let line = line.trim_end_matches(['\n', '\r']);
    if char_len(line) <= config.line_length {
        return None;
    }

    let marker_pos = line.find(config.comment_char)?;
    if line.trim_start().starts_with(config.comment_char) {
        return None;
    }

    let code = line[..marker_pos].trim_end();
    let mut comment = &line[marker_pos..];
    if let Some(rest) = comment.strip_prefix(config.comment_char) {
        comment = rest;
    }
    let comment = comment.trim_start();

    let pad = " ".repeat(indent_of(line));
    Some((
        format!("{pad}{} {comment}", config.comment_char),
        code.to_string(),
    ))
}
