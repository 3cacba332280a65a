#![forbid(unsafe_code)]

//! Replay harness for the registration form.
//!
//! Reads a session script, replays it against an in-memory page with a
//! deterministic clock and reports the final page, the submitted payloads,
//! the submission state and the trace checksum as JSON.

pub mod cli;
pub mod script;

pub use cli::{CliError, Command, Opts};
pub use script::{ReplayReport, ScriptError, ScriptStep, parse_script, replay};
