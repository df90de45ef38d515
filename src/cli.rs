use clap::Parser;
use std::path::PathBuf;

/// fencepack – pick project files and export them as fenced code blocks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project folder to scan (defaults to CWD)
    #[arg(value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Directory the export file is written to (defaults to DIR)
    #[arg(long, short, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Extra comma-separated file names to hide from the tree (case-insensitive).
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    pub exclude_name: Vec<String>,

    /// Extra comma-separated file-name prefixes to hide from the tree (case-insensitive).
    #[arg(long, value_delimiter = ',', value_name = "PREFIXES")]
    pub exclude_prefix: Vec<String>,

    /// Export every scanned file without opening the interactive tree.
    #[arg(long)]
    pub all: bool,

    /// Print the export to stdout instead of writing a file.
    #[arg(long)]
    pub dry_run: bool,

    /// Write diagnostics to this file (interactive sessions are silent otherwise).
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn export_dir(&self) -> PathBuf {
        self.out.clone().unwrap_or_else(|| self.root.clone())
    }
}
