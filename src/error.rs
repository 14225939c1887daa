use std::io;

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SampleError {
    #[error(transparent)]
    #[diagnostic(code(sample::conversion))]
    Conversion(#[from] ConversionError),

    #[error("invalid sample archive {path}, line {line}: {message}")]
    #[diagnostic(code(sample::format))]
    Format {
        path: Utf8PathBuf,
        line: usize,
        message: String,
    },

    #[error("{0}")]
    #[diagnostic(code(sample::validation))]
    Validation(String),

    #[error("filesystem error at {path}: {source}")]
    #[diagnostic(code(sample::io))]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SampleError {
    pub fn io(path: impl Into<Utf8PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(path: impl Into<Utf8PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

/// A sample directory whose bins cannot be packaged. The importer skips the
/// sample and carries on with the next one.
#[derive(Debug, Error, Diagnostic)]
pub enum ConversionError {
    #[error("file {path} is an invalid GTO: {message}")]
    InvalidRecord { path: Utf8PathBuf, message: String },

    #[error("file {path} has no quality information")]
    MissingQuality { path: Utf8PathBuf },

    #[error("file {path} repeats genome {id} already loaded from {previous}")]
    DuplicateGenome {
        id: String,
        path: Utf8PathBuf,
        previous: Utf8PathBuf,
    },

    #[error("directory {0} has no usable sample name")]
    InvalidName(Utf8PathBuf),
}
