//! File processing and the rewrite pipeline.
//!
//! The driver walks a file's lines once, top to bottom:
//!
//! - at each index the rules are tried in fixed priority order (block
//!   reflow, print normalization, inline split, comment merge)
//! - a matching rule's replacement lines are appended to the output and
//!   the index advances past the consumed span
//! - a declining rule falls through to the next rule at the same index
//!
//! The main entry points are [`rewrite_file`] for reader/writer pairs and
//! [`rewrite_lines`] for in-memory line sequences.

pub mod pipeline;

pub use pipeline::{rewrite_file, rewrite_lines, ChangeEvent, RewriteSummary, RuleKind};
