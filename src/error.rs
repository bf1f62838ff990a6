use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to remove a single flagged entry. Never aborts a batch.
#[derive(Debug, Error)]
pub enum RemovalError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("elevated removal of {} failed: {stderr}", .path.display())]
    Elevated { path: PathBuf, stderr: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("refusing to remove protected path {}", .0.display())]
    Protected(PathBuf),
}

impl RemovalError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// An installed-app enumeration source that could not produce a listing.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with status {code:?}")]
    ExitStatus {
        program: &'static str,
        code: Option<i32>,
    },
}
