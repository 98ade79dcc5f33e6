use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for jsonkv operations.
#[derive(Error, Debug)]
pub enum KvError {
    /// The file to load does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file to load does not carry a `.json` extension.
    #[error("file must have a .json extension: {}", .0.display())]
    WrongExtension(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },

    /// The file content is not a flat JSON object of string values.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// The file that was being parsed.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// The document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The document could not be written back to disk.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The file that was being written.
        path: PathBuf,
        /// The underlying IO error.
        source: io::Error,
    },

    /// An operation needs a loaded document.
    #[error("no JSON file loaded")]
    NotLoaded,

    /// Keys must not be empty.
    #[error("key must not be empty")]
    EmptyKey,

    /// The key to add is already present.
    #[error("key already exists: {key} = {value}")]
    KeyExists {
        /// The rejected key.
        key: String,
        /// The value currently stored under it.
        value: String,
    },

    /// The key to remove is absent.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Terminal input or output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Coarse classification of a [`KvError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file could not be located, opened or read.
    Read,
    /// The file content has the wrong shape.
    Parse,
    /// Persisting the document failed.
    Write,
    /// User input was rejected before anything changed.
    Validation,
    /// The session's own input or output stream failed.
    Io,
}

impl KvError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KvError::NotFound(_) | KvError::WrongExtension(_) | KvError::Read { .. } => {
                ErrorKind::Read
            }
            KvError::Parse { .. } => ErrorKind::Parse,
            KvError::Serialize(_) | KvError::Write { .. } => ErrorKind::Write,
            KvError::NotLoaded
            | KvError::EmptyKey
            | KvError::KeyExists { .. }
            | KvError::KeyNotFound(_) => ErrorKind::Validation,
            KvError::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether the interactive session can report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Io
    }
}

/// Result type alias for jsonkv operations.
pub type Result<T> = std::result::Result<T, KvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(KvError::NotFound("a.json".into()).kind(), ErrorKind::Read);
        assert_eq!(KvError::WrongExtension("a.txt".into()).kind(), ErrorKind::Read);
        assert_eq!(KvError::EmptyKey.kind(), ErrorKind::Validation);
        assert_eq!(
            KvError::KeyNotFound("k".to_string()).kind(),
            ErrorKind::Validation
        );
        let err = KvError::Write {
            path: "a.json".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), ErrorKind::Write);
    }

    #[test]
    fn test_only_io_is_fatal() {
        let io_err = KvError::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert!(!io_err.is_recoverable());
        assert!(KvError::NotLoaded.is_recoverable());
    }

    #[test]
    fn test_key_exists_message_shows_pair() {
        let err = KvError::KeyExists {
            key: "greeting".to_string(),
            value: "hello".to_string(),
        };
        assert_eq!(err.to_string(), "key already exists: greeting = hello");
    }
}
