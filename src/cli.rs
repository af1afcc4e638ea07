use clap::Parser;
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  vread                 Snapshot the current directory into readerout/files_structure.txt
  vread -s              Write only the directory tree
  vread -i '*.md' src   Snapshot src/, additionally skipping Markdown files

Ignore patterns are read from readerout/.readerignore, created with defaults on first run.";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "vread",
    version,
    about = "Flatten a directory tree into a single text snapshot",
    after_help = EXAMPLES
)]
pub struct Args {
    /// Directory to snapshot (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output only the directory structure
    #[arg(short = 's', long = "structure")]
    pub structure: bool,

    /// Extra glob pattern added to the ignore list for this run
    #[arg(short = 'i', long = "include", value_name = "PATTERN")]
    pub include: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.quiet {
            self.verbose = 0;
        }
        self
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
