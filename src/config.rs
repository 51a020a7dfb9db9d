//! Store construction settings

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NotesError, Result};

/// Settings used when creating a [`crate::store::Store`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// Initial location of the notes file
    pub persist_path: Option<PathBuf>,
    /// Initial capacity of the record map
    pub initial_capacity: usize,
    /// Indentation width of saved documents; 0 writes a compact document
    pub indent: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            persist_path: None,
            initial_capacity: 64,
            indent: 2,
        }
    }
}

impl NotesConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| NotesError::io(path, e))?;
        Self::from_json_str(&json)
    }

    pub fn with_persist_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_path = Some(path.into());
        self
    }
}
