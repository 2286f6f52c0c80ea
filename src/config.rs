//! Configuration management for stackplan
//!
//! Every invocation option is read once at the process boundary into a
//! [`PlannerConfig`], which is then passed to the planning service. Nothing
//! below this module reads the process environment.
//!
//! # Environment Variables
//!
//! - `PATTERNS`: newline-separated priority globs - default: [`DEFAULT_PATTERNS`]
//! - `ENVIRONMENTS`: JSON object of environment name to path prefix - default: `{"dev":"dev","prod":"prod"}`
//! - `CHANGED_FILES`: JSON array of changed file paths - default: `[]`
//! - `GLOB_FILTER`: comma-separated globs selecting stack directories; wins over `CHANGED_FILES`
//! - `STACK_VALIDATOR`: `none` | `has-tf` | `backend-s3` - default: `backend-s3`
//! - `OUTPUT_MODE`: `stages` | `groups` - default: `stages`
//! - `GITHUB_OUTPUT`: file the result lines are appended to
//!
//! Malformed values never abort a run: each falls back to its default and a
//! warning is logged.
//!
//! # Example
//!
//! ```
//! use stackplan::config::{PlannerConfig, RawOptions};
//!
//! let raw = RawOptions {
//!     environments: Some(r#"{"dev": "stacks/dev"}"#.to_string()),
//!     glob_filter: Some("stacks/dev/*".to_string()),
//!     ..Default::default()
//! };
//! let config = PlannerConfig::from_raw(&raw);
//! assert_eq!(config.glob_filter, vec!["stacks/dev/*"]);
//! ```

use crate::discovery::StackValidator;
use crate::planner::{Environments, GlobError, OutputMode, PatternSet, DEFAULT_PATTERNS};
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub const ENV_PATTERNS: &str = "PATTERNS";
pub const ENV_ENVIRONMENTS: &str = "ENVIRONMENTS";
pub const ENV_CHANGED_FILES: &str = "CHANGED_FILES";
pub const ENV_GLOB_FILTER: &str = "GLOB_FILTER";
pub const ENV_STACK_VALIDATOR: &str = "STACK_VALIDATOR";
pub const ENV_OUTPUT_MODE: &str = "OUTPUT_MODE";
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A priority pattern could not be compiled
    #[error("Invalid priority pattern: {0}")]
    InvalidPattern(#[from] GlobError),
}

/// Unparsed option values as they arrive from the environment or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    pub patterns: Option<String>,
    pub environments: Option<String>,
    pub changed_files: Option<String>,
    pub glob_filter: Option<String>,
    pub stack_validator: Option<String>,
    pub output_mode: Option<String>,
    pub output_file: Option<String>,
}

impl RawOptions {
    /// Reads the options from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            patterns: lookup(ENV_PATTERNS),
            environments: lookup(ENV_ENVIRONMENTS),
            changed_files: lookup(ENV_CHANGED_FILES),
            glob_filter: lookup(ENV_GLOB_FILTER),
            stack_validator: lookup(ENV_STACK_VALIDATOR),
            output_mode: lookup(ENV_OUTPUT_MODE),
            output_file: lookup(ENV_GITHUB_OUTPUT).filter(|v| !v.trim().is_empty()),
        }
    }

    /// Values set in `other` replace the ones in `self`
    pub fn overlay(self, other: RawOptions) -> Self {
        Self {
            patterns: other.patterns.or(self.patterns),
            environments: other.environments.or(self.environments),
            changed_files: other.changed_files.or(self.changed_files),
            glob_filter: other.glob_filter.or(self.glob_filter),
            stack_validator: other.stack_validator.or(self.stack_validator),
            output_mode: other.output_mode.or(self.output_mode),
            output_file: other.output_file.or(self.output_file),
        }
    }
}

/// Fully parsed invocation configuration
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Priority globs, most foundational first
    pub patterns: Vec<String>,
    pub environments: Environments,
    pub changed_files: Vec<String>,
    /// When non-empty, replaces `changed_files` as the candidate source
    pub glob_filter: Vec<String>,
    pub stack_validator: StackValidator,
    pub output_mode: OutputMode,
    /// Directory stack paths are relative to
    pub root: PathBuf,
    pub output_file: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            environments: Environments::default(),
            changed_files: Vec::new(),
            glob_filter: Vec::new(),
            stack_validator: StackValidator::default(),
            output_mode: OutputMode::default(),
            root: PathBuf::from("."),
            output_file: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_raw(raw: &RawOptions) -> Self {
        let stack_validator = match raw.stack_validator.as_deref() {
            None => StackValidator::default(),
            Some(value) => value.parse::<StackValidator>().unwrap_or_else(|e| {
                warn!("{}, using backend-s3", e);
                StackValidator::default()
            }),
        };

        let output_mode = match raw.output_mode.as_deref() {
            None => OutputMode::default(),
            Some(value) if value.trim().is_empty() => OutputMode::default(),
            Some(value) => value.parse::<OutputMode>().unwrap_or_else(|e| {
                warn!("{}, using stages", e);
                OutputMode::default()
            }),
        };

        Self {
            patterns: parse_patterns(raw.patterns.as_deref()),
            environments: parse_environments(raw.environments.as_deref()),
            changed_files: parse_changed_files(raw.changed_files.as_deref()),
            glob_filter: parse_glob_filter(raw.glob_filter.as_deref()),
            stack_validator,
            output_mode,
            output_file: raw.output_file.as_ref().map(PathBuf::from),
            ..Self::default()
        }
    }

    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = root;
        self
    }

    /// Compiles the priority patterns
    pub fn pattern_set(&self) -> Result<PatternSet, ConfigError> {
        Ok(PatternSet::new(&self.patterns)?)
    }

    pub fn uses_glob_filter(&self) -> bool {
        !self.glob_filter.is_empty()
    }
}

impl fmt::Display for PlannerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stackplan Configuration:")?;
        writeln!(f, "  Patterns: {}", self.patterns.len())?;
        writeln!(
            f,
            "  Environments: {}",
            self.environments.names().collect::<Vec<_>>().join(", ")
        )?;
        writeln!(f, "  Changed Files: {}", self.changed_files.len())?;
        writeln!(f, "  Glob Filter: {}", self.glob_filter.join(", "))?;
        writeln!(f, "  Validator Mode: {}", self.stack_validator)?;
        writeln!(f, "  Output Mode: {}", self.output_mode)?;
        writeln!(f, "  Root: {}", self.root.display())?;
        Ok(())
    }
}

/// Newline-separated patterns; blank input selects the defaults
pub fn parse_patterns(input: Option<&str>) -> Vec<String> {
    let patterns: Vec<String> = input
        .unwrap_or("")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if patterns.is_empty() {
        DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
    } else {
        patterns
    }
}

/// JSON object of name to prefix, in declaration order
pub fn parse_environments(input: Option<&str>) -> Environments {
    let input = match input.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Environments::default(),
    };

    let value: serde_json::Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Failed to parse environments, using defaults");
            return Environments::default();
        }
    };

    let Some(object) = value.as_object() else {
        warn!("Environments must be a JSON object, using defaults");
        return Environments::default();
    };

    let mut pairs = Vec::with_capacity(object.len());
    for (name, prefix) in object {
        match prefix.as_str() {
            Some(prefix) => pairs.push((name.clone(), prefix.to_string())),
            None => {
                warn!(environment = %name, "Environment prefix must be a string, using defaults");
                return Environments::default();
            }
        }
    }

    Environments::from_pairs(pairs)
}

/// JSON array of file paths; anything else yields an empty list
pub fn parse_changed_files(input: Option<&str>) -> Vec<String> {
    let input = match input.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Vec::new(),
    };

    match serde_json::from_str::<Vec<String>>(input) {
        Ok(files) => files,
        Err(e) => {
            warn!(error = %e, "Failed to parse changed-files");
            Vec::new()
        }
    }
}

/// Comma-separated globs, blanks dropped
pub fn parse_glob_filter(input: Option<&str>) -> Vec<String> {
    input
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}
