use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Expecting {expected} files but found {found}. Aborting.")]
    CountMismatch { expected: usize, found: usize },
    #[error("No source files found in {dir}")]
    MissingSourceFiles { dir: PathBuf },
    #[error("{path}: {source}")]
    Track {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
    #[error("Template placeholder {placeholder} requests a value but {field} is an empty list (list index out of range)")]
    RenderIndex { placeholder: String, field: &'static str },
    #[error("Template placeholder {placeholder} cannot use {field} value {value:?}")]
    TemplateValue {
        placeholder: String,
        field: &'static str,
        value: String,
    },
    #[error("Destination {path} already exists or is claimed by another file")]
    DestinationExists { path: PathBuf },
    #[error("Unknown skip option: {0}")]
    InvalidSkip(String),
    #[error("Unrecognized release reference: {0}")]
    InvalidReleaseRef(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Tag error: {0}")]
    Lofty(#[from] lofty::error::LoftyError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Malformed release document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Wrap a per-file failure with the path it happened on.
    pub fn for_track(path: impl Into<PathBuf>, source: Error) -> Self {
        Error::Track {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
