//! Object Notes Store
//!
//! Persistent per-object metadata ("notes") for a host application: a
//! comment, priority hints, a custom color, a collapsed flag, and an
//! affinity mask, keyed by `(tag, name)` with case-insensitive names.
//!
//! Records live in an in-memory [`Store`] behind a single exclusive lock and
//! are loaded from / saved to an XML document on request.

pub mod config;
pub mod error;
pub mod global;
pub mod models;
pub mod persist;
pub mod store;

// Re-export commonly used types
pub use config::NotesConfig;
pub use error::{NotesError, Result};
pub use models::{Record, NO_BACK_COLOR};
pub use store::{RecordKey, Store, StoreGuard};
