//! Configuration management for pyreflow.
//!
//! This module provides the [`Config`] struct which controls the rewrite
//! behavior. Configuration can be loaded from:
//! - TOML files (`pyreflow.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories of the
//! first input path up to the filesystem root, plus the user's home
//! directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["pyreflow.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

// Serde default functions
fn default_line_length() -> usize {
    79
}
fn default_break_chars() -> String {
    " ,.:;".to_string()
}
fn default_comment_char() -> char {
    '#'
}
fn default_block_delimiter() -> String {
    "\"\"\"".to_string()
}
fn default_print_prefix() -> String {
    "print(".to_string()
}
fn default_skip_prefix() -> String {
    "def ".to_string()
}
fn default_formatter_command() -> String {
    "black".to_string()
}

/// Main configuration struct for pyreflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum line length (default: 79)
    #[serde(default = "default_line_length")]
    pub line_length: usize,

    /// Characters at which the wrapper may break a line (default: " ,.:;")
    #[serde(default = "default_break_chars")]
    pub break_chars: String,

    /// Comment marker character (default: '#')
    #[serde(default = "default_comment_char")]
    pub comment_char: char,

    /// Delimiter used for generated and detected comment blocks (default: `"""`)
    #[serde(default = "default_block_delimiter")]
    pub block_delimiter: String,

    /// Statement prefix that triggers the commented-print rule (default: "print(")
    #[serde(default = "default_print_prefix")]
    pub print_prefix: String,

    /// Comment prefix excluded from the commented-print rule (default: "def ")
    #[serde(default = "default_skip_prefix")]
    pub skip_prefix: String,

    /// External formatter binary invoked by the commented-print rule (default: "black")
    #[serde(default = "default_formatter_command")]
    pub formatter_command: String,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub line_length: Option<usize>,
    pub break_chars: Option<String>,
    pub comment_char: Option<char>,
    pub block_delimiter: Option<String>,
    pub print_prefix: Option<String>,
    pub skip_prefix: Option<String>,
    pub formatter_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            line_length: 79,
            break_chars: " ,.:;".to_string(),
            comment_char: '#',
            block_delimiter: "\"\"\"".to_string(),
            print_prefix: "print(".to_string(),
            skip_prefix: "def ".to_string(),
            formatter_command: "black".to_string(),
        }
    }
}

impl Config {
    /// Minimum reasonable line length (must leave room for indented text)
    const MIN_LINE_LENGTH: usize = 40;
    /// Maximum reasonable line length
    const MAX_LINE_LENGTH: usize = 1000;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.line_length < Self::MIN_LINE_LENGTH {
            return Some(format!(
                "line_length {} is below minimum of {}",
                self.line_length,
                Self::MIN_LINE_LENGTH
            ));
        }
        if self.line_length > Self::MAX_LINE_LENGTH {
            return Some(format!(
                "line_length {} exceeds maximum of {}",
                self.line_length,
                Self::MAX_LINE_LENGTH
            ));
        }
        if self.break_chars.is_empty() {
            return Some("break_chars must not be empty".to_string());
        }
        if self.block_delimiter.is_empty() {
            return Some("block_delimiter must not be empty".to_string());
        }
        if self.formatter_command.is_empty() {
            return Some("formatter_command must not be empty".to_string());
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.line_length {
            self.line_length = v;
        }
        if let Some(v) = &partial.break_chars {
            self.break_chars = v.clone();
        }
        if let Some(v) = partial.comment_char {
            self.comment_char = v;
        }
        if let Some(v) = &partial.block_delimiter {
            self.block_delimiter = v.clone();
        }
        if let Some(v) = &partial.print_prefix {
            self.print_prefix = v.clone();
        }
        if let Some(v) = &partial.skip_prefix {
            self.skip_prefix = v.clone();
        }
        if let Some(v) = &partial.formatter_command {
            self.formatter_command = v.clone();
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home
    /// directory config. Returns list of config file paths in order of
    /// priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }

    /// Width available for wrapped text at a given indent.
    ///
    /// Clamped to at least 1 so pathological indents cannot produce a
    /// zero-width wrap.
    #[must_use]
    pub fn available_width(&self, indent: usize) -> usize {
        self.line_length.saturating_sub(indent).max(1)
    }
}
