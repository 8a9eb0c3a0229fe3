use clap::Parser;
use std::path::PathBuf;

const SHORT_DESCRIPTION: &str = "Render shell-style ${...} templates";

const LONG_DESCRIPTION: &str = r"
envsub renders templates containing POSIX/bash-style parameter expansions
(${var}, ${var:-default}, ${var/pattern/replacement}, and friends) against
the process environment and/or explicit -D definitions.
";

/// Parsed command-line arguments for `envsub`.
#[derive(Parser)]
#[clap(name = "envsub",
       version,
       about = SHORT_DESCRIPTION,
       long_about = LONG_DESCRIPTION,
       author)]
pub struct CommandLineArgs {
    /// Path to the template file to render; reads standard input when
    /// omitted.
    #[clap(value_name = "TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Write the rendered output to the given file instead of standard
    /// output.
    #[clap(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fail when a referenced variable is unset and no default is supplied.
    #[clap(long = "strict")]
    pub strict: bool,

    /// Define a variable, taking precedence over the environment. May be
    /// given multiple times.
    #[clap(short = 'D', long = "define", value_name = "NAME=VALUE")]
    pub defines: Vec<String>,

    /// Resolve variables from -D definitions only, ignoring the environment.
    #[clap(long = "no-env")]
    pub no_env: bool,
}
