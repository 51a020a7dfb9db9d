//! A single object note
//!
//! Records are keyed by `(tag, name)` inside a [`crate::store::Store`]. The
//! numeric fields are opaque to the store; hosts mutate them directly through
//! a `&mut Record` obtained while holding the store lock.

/// Back color value meaning "no custom color" (distinct from color 0)
pub const NO_BACK_COLOR: u32 = u32::MAX;

/// One stored note
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Category of the target object
    pub tag: u32,
    /// Name of the target object, compared case-insensitively
    pub name: String,
    pub comment: String,
    pub priority_class: u32,
    /// Real I/O priority + 1, so 0 means "not set"
    pub io_priority_plus_one: u32,
    /// Custom color, or [`NO_BACK_COLOR`]
    pub back_color: u32,
    pub collapse: bool,
    pub affinity_mask: usize,
}

impl Record {
    /// Create a record with default field values
    pub fn new(tag: u32, name: impl Into<String>) -> Self {
        Self {
            tag,
            name: name.into(),
            comment: String::new(),
            priority_class: 0,
            io_priority_plus_one: 0,
            back_color: NO_BACK_COLOR,
            collapse: false,
            affinity_mask: 0,
        }
    }

    /// Install a new comment, handing the previous one back to the caller
    pub fn replace_comment(&mut self, comment: String) -> String {
        std::mem::replace(&mut self.comment, comment)
    }

    /// Decoded I/O priority (`None` when unset)
    pub fn io_priority(&self) -> Option<u32> {
        self.io_priority_plus_one.checked_sub(1)
    }

    pub fn set_io_priority(&mut self, priority: Option<u32>) {
        // u32::MAX cannot be represented with the +1 offset; saturate instead of wrapping to "unset"
        self.io_priority_plus_one = priority.map_or(0, |p| p.saturating_add(1));
    }

    /// Custom back color (`None` when the sentinel is stored)
    pub fn custom_back_color(&self) -> Option<u32> {
        (self.back_color != NO_BACK_COLOR).then_some(self.back_color)
    }

    pub fn set_custom_back_color(&mut self, color: Option<u32>) {
        self.back_color = color.unwrap_or(NO_BACK_COLOR);
    }
}
