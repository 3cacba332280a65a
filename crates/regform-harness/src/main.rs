#![forbid(unsafe_code)]

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use regform_harness::cli::{HELP_TEXT, VERSION};
use regform_harness::{Command, Opts, ScriptError, parse_script, replay};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_script(opts: &Opts) -> Result<String, ScriptError> {
    match &opts.script {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn run(opts: Opts) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_script(&opts)?;
    let steps = parse_script(&text)?;
    tracing::info!(steps = steps.len(), locale = %opts.config.locale, "replaying script");
    let report = replay(&steps, opts.config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    init_tracing();

    let opts = match Command::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            println!("{HELP_TEXT}");
            return;
        }
        Ok(Command::Version) => {
            println!("regform-harness {VERSION}");
            return;
        }
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Run with --help for usage information.");
            process::exit(2);
        }
    };

    if let Err(err) = run(opts) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}
