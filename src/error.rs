use std::path::{Path, PathBuf};
use std::{error, fmt, io, result};

#[derive(Debug)]
enum ErrorKind {
    Open { path: PathBuf, source: io::Error },
    Stat { path: PathBuf, source: io::Error },
    Map { path: PathBuf, source: io::Error },
}

/// An error that can occur when opening and mapping a file.
///
/// Scanning itself is infallible: once a [`Reader`](crate::Reader) has been
/// constructed, every byte sequence is a valid input.
#[derive(Debug)]
pub struct Error(ErrorKind);

impl Error {
    pub(crate) fn open(path: &Path, source: io::Error) -> Self {
        Self(ErrorKind::Open {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn stat(path: &Path, source: io::Error) -> Self {
        Self(ErrorKind::Stat {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn map(path: &Path, source: io::Error) -> Self {
        Self(ErrorKind::Map {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        Self::new(io::ErrorKind::Other, err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.0 {
            ErrorKind::Open { source, .. }
            | ErrorKind::Stat { source, .. }
            | ErrorKind::Map { source, .. } => Some(source),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.0 {
            ErrorKind::Open { path, source } => {
                write!(f, "cannot open '{}': {}", path.display(), source)
            }
            ErrorKind::Stat { path, source } => {
                write!(f, "cannot stat '{}': {}", path.display(), source)
            }
            ErrorKind::Map { path, source } => {
                write!(f, "cannot memory-map '{}': {}", path.display(), source)
            }
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
