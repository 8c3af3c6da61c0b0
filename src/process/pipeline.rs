//! Line-driven rewrite pipeline
//!
//! Walks a file's lines top-to-bottom, trying the rewrite rules in fixed
//! priority order at each index: block reflow, commented-print
//! normalization, inline-comment splitting, comment-run merging. The
//! first matching rule wins; a declining rule falls through to the next
//! at the same index. Multi-line rules report the index of the first
//! unconsumed line, which becomes the resume point.

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::format::{
    char_len, is_full_line_comment, merge_comment_run, normalize_commented_print,
    reflow_block_comment, split_inline_comment,
};
use crate::formatter::CodeFormatter;
use crate::Result;

/// Which rewrite rule produced a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Existing triple-quoted block reflowed
    BlockReflow,
    /// Commented-out print statement normalized
    PrintNormalize,
    /// Inline comment split off an overlong code line
    InlineSplit,
    /// Run of full-line comments merged
    CommentMerge,
}

/// One rewrite event: a rule applied to the input span `[start, end)`
/// (0-based line indices).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub rule: RuleKind,
    pub start: usize,
    pub end: usize,
}

/// Per-file outcome of a rewrite pass.
#[derive(Debug, Default)]
pub struct RewriteSummary {
    /// Number of rule applications (not output lines)
    pub changes: usize,
    /// The individual rewrite events, in input order
    pub events: Vec<ChangeEvent>,
}

impl RewriteSummary {
    fn record(&mut self, rule: RuleKind, start: usize, end: usize) {
        self.changes += 1;
        self.events.push(ChangeEvent { rule, start, end });
    }
}

/// Rewrite a file's lines, returning the new lines and a summary of the
/// changes made.
///
/// Input lines are expected without terminators; the output carries none
/// either. Unmatched lines pass through unchanged, so a file with no
/// overlong comment constructs comes back identical.
#[must_use]
pub fn rewrite_lines(
    lines: &[String],
    config: &Config,
    formatter: &dyn CodeFormatter,
) -> (Vec<String>, RewriteSummary) {
    let mut output = Vec::with_capacity(lines.len());
    let mut summary = RewriteSummary::default();

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];

        // Existing triple-quoted blocks take priority over everything
        if line.trim_start().starts_with(&config.block_delimiter) {
            if let Some((block, end)) = reflow_block_comment(lines, i, config) {
                summary.record(RuleKind::BlockReflow, i, end);
                output.extend(block);
                i = end;
                continue;
            }
        }

        if let Some(block) = normalize_commented_print(line, config, formatter) {
            summary.record(RuleKind::PrintNormalize, i, i + 1);
            output.extend(block);
            i += 1;
            continue;
        }

        if let Some((comment, code)) = split_inline_comment(line, config) {
            summary.record(RuleKind::InlineSplit, i, i + 1);
            output.push(comment);
            output.push(code);
            i += 1;
            continue;
        }

        if is_full_line_comment(line, config.comment_char) && char_len(line) > config.line_length {
            if let Some((block, end)) = merge_comment_run(lines, i, config) {
                summary.record(RuleKind::CommentMerge, i, end);
                output.extend(block);
                i = end;
                continue;
            }
        }

        output.push(line.clone());
        i += 1;
    }

    (output, summary)
}

/// Rewrite a whole file from a reader to a writer.
///
/// Terminators are normalized on input (both `\n` and `\r\n` accepted)
/// and every output line is written with a trailing `\n`.
pub fn rewrite_file<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    config: &Config,
    formatter: &dyn CodeFormatter,
) -> Result<RewriteSummary> {
    let mut lines = Vec::new();
    for line in input.lines() {
        lines.push(line?);
    }

    let (rewritten, summary) = rewrite_lines(&lines, config, formatter);
    for line in &rewritten {
        writeln!(output, "{line}")?;
    }

    Ok(summary)
}
