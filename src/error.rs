//! Error types for the notes store
//!
//! Lookups report absence as `None`; everything here is a real failure that
//! is returned to the immediate caller exactly once.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotesError {
    /// The notes file or its parent directory could not be opened, created,
    /// read, or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A caller-supplied reader or writer failed
    #[error("stream error: {0}")]
    Stream(#[from] io::Error),

    /// The persisted document could not be parsed
    #[error("corrupt notes document: {0}")]
    CorruptFormat(String),

    #[error("xml write error: {0}")]
    Write(#[from] quick_xml::Error),

    /// `load`/`save` was called before a persist path was set
    #[error("no persist path configured")]
    NoPersistPath,

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl NotesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        NotesError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the persisted file simply does not exist yet.
    ///
    /// Hosts usually treat this as "nothing to load" on first start.
    pub fn is_not_found(&self) -> bool {
        match self {
            NotesError::Io { source, .. } | NotesError::Stream(source) => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, NotesError::CorruptFormat(_))
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
