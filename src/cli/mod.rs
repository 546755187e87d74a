use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "asc-tree",
    version,
    about = "Show the include:: tree of Asciidoctor documents",
    long_about = "Scan a directory for Asciidoctor documents and print the tree of their include:: directives. The normal view starts from documents nobody includes; the reverse view lists, for every document, the chain of documents including it. Revisited documents are marked (cycle) and not expanded again. Paths are shown relative to the current directory unless --base is given."
)]
pub struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,
    /// For each document, show which documents include it
    #[arg(short, long, default_value_t = false, overrides_with = "no_reverse")]
    pub reverse: bool,
    /// Show the normal view even if the config file asks for the reverse one
    #[arg(long, default_value_t = false, overrides_with = "reverse")]
    pub no_reverse: bool,
    /// Output format (default: text, or the config file's output.format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Document extension to scan for, without the dot (default: asc)
    #[arg(long, value_name = "EXT")]
    pub ext: Option<String>,
    /// Honor .gitignore/.ignore files while scanning
    #[arg(long, default_value_t = false, overrides_with = "no_respect_ignore")]
    pub respect_ignore: bool,
    /// Scan ignored files even if the config file enables respect_ignore
    #[arg(long, default_value_t = false, overrides_with = "respect_ignore")]
    pub no_respect_ignore: bool,
    /// Display paths relative to this directory instead of the current one
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,
    /// Path to a TOML configuration file (default: <ROOT>/asc-tree.toml if present)
    #[arg(long, value_name = "FILE", env = "ASC_TREE_CONFIG")]
    pub config: Option<PathBuf>,
    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
    /// Suppress warnings
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
    /// Print diagnostics to stderr (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
    Dot,
}

impl OutputFormat {
    /// Parse the names accepted in configuration files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            "dot" => Some(Self::Dot),
            _ => None,
        }
    }
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
