use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure to load a single benchmark report.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("reading report {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decoding report {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("missing credentials: {0}")]
    Credentials(String),

    #[error("sheets transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("sheets API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected sheets response: {0}")]
    Response(String),

    #[error("sink rejected call #{call}: {message}")]
    Rejected { call: usize, message: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, Error>;
