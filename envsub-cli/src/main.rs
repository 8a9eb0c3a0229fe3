//! Implements the command-line interface for the `envsub` template renderer.

mod args;

use std::collections::HashMap;
use std::io::{Read, Write};
use std::process::ExitCode;

use clap::Parser;
use envsub_core::VariableProvider;

use crate::args::CommandLineArgs;

#[derive(Debug, thiserror::Error)]
enum CliError {
    /// A -D argument was not of the form NAME=VALUE.
    #[error("invalid definition '{0}'; expected NAME=VALUE")]
    InvalidDefinition(String),

    /// The template failed to parse or expand.
    #[error(transparent)]
    Expansion(#[from] envsub_core::Error),

    /// An I/O error occurred reading the template or writing the output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Resolves variables from explicit definitions first, then (optionally)
/// from the process environment.
struct CliVariables {
    defines: HashMap<String, String>,
    use_env: bool,
}

impl VariableProvider for CliVariables {
    fn lookup(&self, name: &str) -> Option<String> {
        if let Some(value) = self.defines.get(name) {
            return Some(value.clone());
        }

        if self.use_env {
            std::env::var(name).ok()
        } else {
            None
        }
    }
}

/// Main entry point for the `envsub` renderer.
fn main() -> ExitCode {
    let args = CommandLineArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("envsub: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CommandLineArgs) -> Result<(), CliError> {
    let provider = CliVariables {
        defines: parse_defines(&args.defines)?,
        use_env: !args.no_env,
    };

    let template = match &args.template {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            std::io::stdin().lock().read_to_string(&mut text)?;
            text
        }
    };

    tracing::debug!("rendering template ({} bytes)", template.len());

    let rendered = if args.strict {
        envsub_core::expand_strict(template.as_str(), &provider)?
    } else {
        envsub_core::expand(template.as_str(), &provider)?
    };

    match &args.output {
        Some(path) => std::fs::write(path, rendered)?,
        None => std::io::stdout().lock().write_all(rendered.as_bytes())?,
    }

    Ok(())
}

fn parse_defines(defines: &[String]) -> Result<HashMap<String, String>, CliError> {
    let mut parsed = HashMap::new();
    for define in defines {
        let (name, value) = define
            .split_once('=')
            .ok_or_else(|| CliError::InvalidDefinition(define.clone()))?;
        parsed.insert(name.to_owned(), value.to_owned());
    }
    Ok(parsed)
}
