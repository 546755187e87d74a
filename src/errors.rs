use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read {file}: {source}")]
    Io { file: PathBuf, source: std::io::Error },
}

#[derive(Debug, Error)]
pub enum IncludeGraphError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("no .{extension} files found under {root}")]
    NoDocuments { root: PathBuf, extension: String },

    #[error("{path} is not below {base}; run from a directory containing all documents or pass --base")]
    OutsideBase { path: PathBuf, base: PathBuf },

    #[error("invalid configuration {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}
