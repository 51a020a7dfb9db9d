//! Data model for stored object notes

pub mod record;

// Re-export commonly used types
pub use record::*;
