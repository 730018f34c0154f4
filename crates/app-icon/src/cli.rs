use std::path::PathBuf;

use clap::Parser;

/// Switch the app icon on a simulated host.
///
/// Commands: `supports`, `current`, `list`, `set <name>`, `quit`.
/// With no commands, reads them from standard input, one or more per line.
#[derive(Debug, Parser)]
#[command(name = "app-icon", version)]
pub struct Cli {
    /// Configuration file (default: the user config directory).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Icon manifest, overriding the configured one.
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Use the blocking icon switch instead of the async one.
    #[arg(long)]
    pub blocking: bool,

    /// Debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Commands to run in order.
    #[arg(value_name = "COMMAND", trailing_var_arg = true)]
    pub commands: Vec<String>,
}
