use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid project folder path: {0}")]
    NotADirectory(PathBuf),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("No files selected.")]
    NoSelection,

    #[error("Invalid export path: {0}")]
    InvalidDestination(PathBuf),

    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
