//! Comment rewrite rules and supporting text helpers.
//!
//! Each rule inspects a line (or a run of lines) and either declines or
//! produces replacement lines:
//!
//! - [`reflow_block_comment`]: reflow an existing triple-quoted block
//! - [`normalize_commented_print`]: turn a commented-out print statement
//!   into a formatted triple-quoted block
//! - [`split_inline_comment`]: detach a trailing inline comment from an
//!   overlong code line
//! - [`merge_comment_run`]: merge consecutive overlong full-line comments
//!   into one rewrapped block
//!
//! The driver in [`crate::process`] owns rule priority and line-index
//! advancement; rules here are pure text transformations (except the
//! print rule, which calls out to the formatter collaborator).

pub mod block_reflow;
pub mod comment_merge;
pub mod inline_split;
pub mod print_stmt;
pub mod wrap;

pub use block_reflow::reflow_block_comment;
pub use comment_merge::merge_comment_run;
pub use inline_split::split_inline_comment;
pub use print_stmt::normalize_commented_print;
pub use wrap::wrap_text;

/// Number of leading whitespace characters on a line.
#[must_use]
pub fn indent_of(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Line length in characters, ignoring any trailing line terminator.
#[must_use]
pub fn char_len(line: &str) -> usize {
    line.trim_end_matches(['\n', '\r']).chars().count()
}

/// True if the first non-whitespace character is the comment marker.
#[must_use]
pub fn is_full_line_comment(line: &str, comment_char: char) -> bool {
    line.trim_start().starts_with(comment_char)
}

/// Slice off the first `n` characters of `s`.
///
/// Returns the empty string if `s` has `n` characters or fewer. Used to
/// strip a common-indent prefix without assuming single-byte content.
#[must_use]
pub(crate) fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

/// Enclose wrapped body text in delimiter lines at the given indent.
///
/// Every body line is re-indented and trailing-trimmed; lines that are
/// empty after trimming are dropped.
pub(crate) fn delimiter_block(body: &str, indent: usize, delimiter: &str) -> Vec<String> {
    let pad = " ".repeat(indent);
    let mut block = vec![format!("{pad}{delimiter}")];
    for segment in body.split('\n') {
        let segment = segment.trim_end();
        if segment.is_empty() {
            continue;
        }
        block.push(format!("{pad}{segment}"));
    }
    block.push(format!("{pad}{delimiter}"));
    block
}
