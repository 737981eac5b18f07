use std::io;
use std::path::PathBuf;

/// Errors returned by the filesystem helpers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The search pattern is not a valid regular expression.
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// None of the candidate directories contains the file.
    /// `path` is the last candidate tried (empty when there were none).
    #[error("{} not found in paths", path.display())]
    NotFound { path: PathBuf },

    /// A read or write failed after the file was opened.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Open { source, .. } | Self::Io { source, .. } => Some(source),
            Self::Pattern { .. } | Self::NotFound { .. } => None,
        }
    }
}
