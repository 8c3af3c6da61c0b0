//! Command-line interface for pyreflow.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to process
    pub inputs: Vec<PathBuf>,

    /// Maximum line length
    pub line_length: Option<usize>,

    /// External formatter command (overrides config)
    pub formatter: Option<String>,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom Python file extensions (in addition to defaults)
    pub extensions: Vec<String>,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("pyreflow")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reflow and normalize comments in Python source files")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to process")
                .value_name("PATH")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("line-length")
                .short('l')
                .long("line-length")
                .help("Maximum line length [default: 79]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("formatter")
                .long("formatter")
                .help("External formatter command [default: black]")
                .value_name("CMD"),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Write result to stdout instead of rewriting in place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Config file path (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Process directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/dirs matching pattern (repeatable)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("ext")
                .short('x')
                .long("ext")
                .help("Additional Python extension (repeatable)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no per-file output)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config, rule decisions)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        line_length: matches.get_one::<usize>("line-length").copied(),
        formatter: matches.get_one::<String>("formatter").cloned(),
        stdout: matches.get_flag("stdout"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        extensions: matches
            .get_many::<String>("ext")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        debug: matches.get_flag("debug"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        assert_eq!(cmd.get_name(), "pyreflow");
    }

    #[test]
    fn test_cli_defaults() {
        let args = parse_args_from(vec!["pyreflow", "file.py"]);
        assert_eq!(args.inputs, vec![PathBuf::from("file.py")]);
        assert_eq!(args.line_length, None);
        assert_eq!(args.formatter, None);
        assert!(!args.stdout);
        assert!(!args.recursive);
        assert!(!args.silent);
        assert!(!args.debug);
        assert!(args.exclude.is_empty());
        assert!(args.extensions.is_empty());
    }

    #[test]
    fn test_line_length_flag() {
        let args = parse_args_from(vec!["pyreflow", "-l", "100", "file.py"]);
        assert_eq!(args.line_length, Some(100));
    }

    #[test]
    fn test_formatter_flag() {
        let args = parse_args_from(vec!["pyreflow", "--formatter", "ruff", "file.py"]);
        assert_eq!(args.formatter, Some("ruff".to_string()));
    }

    #[test]
    fn test_multiple_inputs() {
        let args = parse_args_from(vec!["pyreflow", "a.py", "b.py", "src/"]);
        assert_eq!(args.inputs.len(), 3);
    }

    #[test]
    fn test_recursive_and_exclude() {
        let args = parse_args_from(vec![
            "pyreflow", "-r", "-e", "venv", "--exclude", "build", "src/",
        ]);
        assert!(args.recursive);
        assert_eq!(args.exclude, vec!["venv", "build"]);
    }

    #[test]
    fn test_multiple_extensions() {
        let args = parse_args_from(vec!["pyreflow", "-x", "pyw", "--ext", "pyi", "src/"]);
        assert_eq!(args.extensions, vec!["pyw", "pyi"]);
    }

    #[test]
    fn test_jobs_flag() {
        let args = parse_args_from(vec!["pyreflow", "-j", "4", "file.py"]);
        assert_eq!(args.jobs, Some(4));
    }

    #[test]
    fn test_stdout_and_silent_flags() {
        let args = parse_args_from(vec!["pyreflow", "-s", "-S", "file.py"]);
        assert!(args.stdout);
        assert!(args.silent);
    }

    #[test]
    fn test_config_flag() {
        let args = parse_args_from(vec!["pyreflow", "-c", "custom.toml", "file.py"]);
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn test_debug_flag() {
        let args = parse_args_from(vec!["pyreflow", "-D", "file.py"]);
        assert!(args.debug);
    }
}
