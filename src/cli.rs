use crate::document::Format;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "deep-merge",
    about = "Deep-merge JSON and TOML documents",
    long_about = "deep-merge combines nested documents key by key.

Documents are folded from left to right: the first file is the base, and
each following file is merged over the result so far. For every key:
  • keys missing from the base are added
  • nested tables/objects on both sides are merged recursively
  • anything else (scalars, arrays, a table against a scalar) is replaced
    by the later document's value

Defaults can be set in:
  • $XDG_CONFIG_HOME/deep-merge/config.toml (or ~/.config/deep-merge/config.toml)

Examples:
  # Layer an override on top of a base file
  deep-merge base.json override.json

  # Mix formats and emit TOML
  deep-merge defaults.toml local.json --output-format toml

  # Read the last layer from stdin
  echo '{\"debug\": true}' | deep-merge base.json -",
    version,
    author
)]
pub struct Cli {
    /// Documents to merge, lowest precedence first (`-` reads stdin)
    #[arg(value_name = "FILES", required = true, num_args = 1.., value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Input format for every file (default: by extension, else JSON)
    #[arg(short, long, value_enum, env = "DEEP_MERGE_FORMAT")]
    pub format: Option<Format>,

    /// Output format (default: config file, else JSON)
    #[arg(short, long, value_enum)]
    pub output_format: Option<Format>,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Enable debug output (shows INFO and DEBUG messages)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Enable trace output (shows all log messages including TRACE)
    #[arg(short = 't', long, global = true)]
    pub trace: bool,
}
