//! XML persistence for the notes store
//!
//! Document layout:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <objects>
//!   <object tag="1" name="notepad.exe" priorityclass="0" iopriorityplusone="0"
//!           backcolor="4294967295" collapse="0" affinity="0">comment</object>
//! </objects>
//! ```
//!
//! Child order follows the store's internal enumeration order and is not
//! stable between saves.

pub mod escape;
pub mod loader;
pub mod node;
pub mod number;
pub mod saver;

pub use node::ObjectNode;
pub use saver::write_document;
