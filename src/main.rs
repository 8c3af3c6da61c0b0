//! pyreflow - comment reflow tool for Python source files

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use glob::Pattern;
use pyreflow::process::{rewrite_file, ChangeEvent, RewriteSummary, RuleKind};
use pyreflow::{parse_args, BlackFormatter, CliArgs, CodeFormatter, Config, Result};
use rayon::prelude::*;
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Python file extensions to process
const PYTHON_EXTENSIONS: &[&str] = &["py"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    let args = parse_args();

    if args.inputs.is_empty() {
        print_usage();
        return Ok(());
    }

    let config = build_config(&args)?;

    // The formatter binary is probed exactly once; a missing formatter is
    // fatal before any file is touched
    let formatter = BlackFormatter::new(config.formatter_command.clone());
    if !formatter.is_available() {
        anyhow::bail!(
            "'{}' is not available in your PATH. Please install it (e.g., pip install black).",
            config.formatter_command
        );
    }

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No Python files found to process.");
        }
        return Ok(());
    }

    let use_sequential = args.stdout || args.jobs == Some(1);
    if use_sequential {
        for path in &files {
            if let Err(e) = process_single_file(path, &config, &formatter, &args) {
                eprintln!("Error processing {}: {}", path.display(), e);
            }
        }
    } else {
        process_files_parallel(&files, &config, &formatter, &args);
    }

    Ok(())
}

/// Build configuration from CLI args and optional config file
fn build_config(args: &CliArgs) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else {
        // Discovery is seeded from the first input so a config sitting
        // next to the processed files wins over one in the invocation
        // directory
        let start = args
            .inputs
            .first()
            .map_or_else(|| std::env::current_dir().unwrap_or_default(), Clone::clone);
        if args.debug {
            let discovered = Config::discover_config_files(&start);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered");
            } else {
                eprintln!("[DEBUG] Discovered config files:");
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if let Some(line_length) = args.line_length {
        config.line_length = line_length;
    }
    if let Some(formatter) = &args.formatter {
        config.formatter_command.clone_from(formatter);
    }

    if args.debug {
        eprintln!("[DEBUG] Configuration:");
        eprintln!("[DEBUG]   line_length: {}", config.line_length);
        eprintln!("[DEBUG]   break_chars: {:?}", config.break_chars);
        eprintln!("[DEBUG]   block_delimiter: {}", config.block_delimiter);
        eprintln!("[DEBUG]   print_prefix: {}", config.print_prefix);
        eprintln!("[DEBUG]   formatter_command: {}", config.formatter_command);
    }

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let custom_extensions = &args.extensions;

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // WalkDir detects symlink loops with follow_links(true);
                // errors are skipped via filter_map(ok). max_depth bounds
                // traversal of pathological directory structures.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_python_file(path, custom_extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_python_file(&path, custom_extensions)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        if pattern.matches(&path_str) {
            return true;
        }

        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check if a file has a Python extension
/// Checks against both default extensions and any custom extensions provided
fn is_python_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            if PYTHON_EXTENSIONS.contains(&ext) {
                return true;
            }
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

/// Process files in parallel using Rayon
fn process_files_parallel(
    files: &[PathBuf],
    config: &Config,
    formatter: &BlackFormatter,
    args: &CliArgs,
) {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        match process_single_file(path, config, formatter, args) {
            Ok(()) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error processing {}: {}", path.display(), e);
            }
        }
    });

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent {
        if errors == 0 {
            eprintln!("Processed {success} files successfully.");
        } else {
            eprintln!("Processed {success} files, {errors} errors.");
        }
    }
}

/// Describe one rewrite event with 1-based line numbers
fn describe_event(event: &ChangeEvent, path: &Path) -> String {
    let file = path.display();
    let first = event.start + 1;
    let last = event.end;
    match event.rule {
        RuleKind::BlockReflow => {
            format!("Processed triple-quoted block in {file} (lines {first}-{last}).")
        }
        RuleKind::PrintNormalize => {
            format!("Modified commented-out print in {file} at line {first}.")
        }
        RuleKind::InlineSplit => format!("Split inline comment in {file} at line {first}."),
        RuleKind::CommentMerge => {
            format!("Merged comment block in {file} from line {first} to {last}.")
        }
    }
}

/// Report per-file results to `sink`
fn report_summary<W: Write>(
    summary: &RewriteSummary,
    path: &Path,
    args: &CliArgs,
    sink: &mut W,
) -> io::Result<()> {
    if args.silent {
        return Ok(());
    }
    for event in &summary.events {
        writeln!(sink, "{}", describe_event(event, path))?;
    }
    writeln!(
        sink,
        "Processed {}: {} modification(s) made.",
        path.display(),
        summary.changes
    )?;
    Ok(())
}

/// Process a single file
fn process_single_file(
    path: &Path,
    config: &Config,
    formatter: &dyn CodeFormatter,
    args: &CliArgs,
) -> Result<()> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({size_mb} MB exceeds limit of {limit_mb} MB)",
                path.display(),
            );
        }
        return Ok(());
    }

    let reader = BufReader::new(File::open(path)?);
    let mut output = Vec::new();
    let summary = rewrite_file(reader, &mut output, config, formatter)?;

    if args.stdout {
        io::stdout().write_all(&output)?;
        // Reports must not interleave with the rewritten source on a
        // redirected stdout
        report_summary(&summary, path, args, &mut io::stderr().lock())?;
    } else {
        write_atomic(path, &output)?;
        report_summary(&summary, path, args, &mut io::stdout().lock())?;
    }

    Ok(())
}

/// Write contents to `path` atomically: stage in a temp file in the same
/// directory, then rename over the original. A crash mid-run never leaves
/// a half-written file behind.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    use anyhow::Context;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.persist(path)
        .with_context(|| format!("failed to replace {}", path.display()))?;

    Ok(())
}

fn print_usage() {
    println!(
        "pyreflow v{} - Python comment reflow tool",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Rewrites comment regions so no line exceeds the column limit.");
    println!();
    println!("Usage:");
    println!("  pyreflow [OPTIONS] <PATH>...");
    println!("  pyreflow [OPTIONS] -r <DIRECTORY>");
    println!();
    println!("Examples:");
    println!("  pyreflow file.py                # Rewrite single file in-place");
    println!("  pyreflow *.py                   # Rewrite multiple files");
    println!("  pyreflow -r src/                # Recursively process directory");
    println!("  pyreflow --stdout file.py       # Output to stdout");
    println!("  pyreflow -l 100 file.py         # Use a 100-column limit");
    println!();
    println!("Options:");
    println!("  -l, --line-length <NUM>         Max line length [default: 79]");
    println!("      --formatter <CMD>           External formatter command [default: black]");
    println!("  -r, --recursive                 Process directories recursively");
    println!("  -e, --exclude <PATTERN>         Exclude files/dirs matching pattern (repeatable)");
    println!("  -x, --ext <EXT>                 Additional Python extension (repeatable)");
    println!("  -j, --jobs <NUM>                Parallel jobs (0=auto, 1=sequential)");
    println!("  -s, --stdout                    Output to stdout");
    println!("  -c, --config <FILE>             Config file path (overrides auto-discovery)");
    println!("  -S, --silent                    Silent mode");
    println!("  -D, --debug                     Enable debug output");
    println!("  -h, --help                      Print help");
    println!();
    println!("Requires the Python formatter 'black' (or a compatible replacement");
    println!("set via --formatter) to be available in PATH.");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for pyreflow.toml in parent directories of the first");
    println!("  input path up to the root, plus the home directory. More specific");
    println!("  configs (closer to the files) override less specific ones.");
    println!();
    println!("Always back up your files or use version control before running.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use pyreflow::parse_args_from;

    /// Stub formatter that returns the code unchanged.
    struct EchoFormatter;

    impl CodeFormatter for EchoFormatter {
        fn format(&self, code: &str, _max_width: usize) -> Result<String> {
            Ok(format!("{code}\n"))
        }
    }

    #[test]
    fn test_stdout_stream_carries_only_rewritten_source() {
        let args = parse_args_from(vec!["pyreflow", "-s", "file.py"]);
        let long = format!("# {}", "word ".repeat(20));
        let source = format!("{long}\nx = 1\n");

        let mut stdout_buf = Vec::new();
        let summary = rewrite_file(
            Cursor::new(source.as_str()),
            &mut stdout_buf,
            &Config::default(),
            &EchoFormatter,
        )
        .unwrap();

        let mut report_buf = Vec::new();
        report_summary(&summary, Path::new("file.py"), &args, &mut report_buf).unwrap();

        // The rewritten source and the report stay on separate streams
        let rewritten = String::from_utf8(stdout_buf).unwrap();
        assert!(rewritten.starts_with("\"\"\"\n"));
        assert!(rewritten.ends_with("x = 1\n"));
        assert!(!rewritten.contains("Merged comment block"));
        assert!(!rewritten.contains("modification(s) made"));

        let report = String::from_utf8(report_buf).unwrap();
        assert!(report.contains("Merged comment block in file.py"));
        assert!(report.contains("Processed file.py: 1 modification(s) made."));
    }

    #[test]
    fn test_report_silenced() {
        let args = parse_args_from(vec!["pyreflow", "-S", "file.py"]);
        let summary = RewriteSummary::default();
        let mut report_buf = Vec::new();
        report_summary(&summary, Path::new("file.py"), &args, &mut report_buf).unwrap();
        assert!(report_buf.is_empty());
    }
}
