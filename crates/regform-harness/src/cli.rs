#![forbid(unsafe_code)]

//! Command-line argument parsing for the replay harness.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Environment variables (`REGFORM_*`, then `LC_ALL`/`LANG` for the locale)
//! seed the configuration; explicit flags override them.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use regform_core::{ConfigError, FormConfig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
regform-harness: replay a registration-form session and print the page

USAGE:
    regform-harness [OPTIONS]

OPTIONS:
    --script=PATH        Read the session script from PATH (default: stdin)
    --delay-ms=N         Delay between a passing submit and the handoff (default: 500)
    --locale=TAG         Message language, e.g. 'en' or 'zh-CN'
    --highlight-missing  Mark empty required fields when a submit is rejected
    --help, -h           Show this help message
    --version, -V        Show version

SCRIPT FORMAT (one JSON object per line, '#' starts a comment):
    {\"type\":\"input\",\"field\":\"username\",\"value\":\"user_1\"}
    {\"type\":\"submit\"}
    {\"type\":\"advance\",\"ms\":500}

ENVIRONMENT VARIABLES:
    REGFORM_SUBMIT_DELAY_MS     Default for --delay-ms
    REGFORM_LOCALE              Default for --locale (falls back to LC_ALL, LANG)
    REGFORM_HIGHLIGHT_MISSING   Default for --highlight-missing (1/true/yes/on)
    RUST_LOG                    Log filter for stderr output (default: warn)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Script file; `None` reads stdin.
    pub script: Option<PathBuf>,
    /// Form configuration after environment and flag overrides.
    pub config: FormConfig,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Invalid command line or environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    InvalidValue { flag: &'static str, value: String },
    UnknownArgument(String),
    Config(ConfigError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::InvalidValue { .. } | Self::UnknownArgument(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl Command {
    /// Parse `args` (without the program name), reading environment
    /// variables through `lookup`.
    pub fn parse_from<I>(args: I, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut opts = Opts {
            script: None,
            config: FormConfig::from_lookup(lookup)?,
        };

        for arg in args {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Self::Help),
                "--version" | "-V" => return Ok(Self::Version),
                "--highlight-missing" => {
                    opts.config = opts.config.with_highlight_missing(true);
                }
                other => {
                    if let Some(val) = other.strip_prefix("--script=") {
                        opts.script = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--delay-ms=") {
                        let ms: u64 = val.parse().map_err(|_| CliError::InvalidValue {
                            flag: "--delay-ms",
                            value: val.to_string(),
                        })?;
                        opts.config = opts.config.with_submit_delay(Duration::from_millis(ms));
                    } else if let Some(val) = other.strip_prefix("--locale=") {
                        if val.trim().is_empty() {
                            return Err(CliError::InvalidValue {
                                flag: "--locale",
                                value: val.to_string(),
                            });
                        }
                        opts.config = opts.config.with_locale(val);
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Self::Run(opts))
    }
}
