//! Store → notes document
//!
//! The store lock is held only while records are copied into
//! [`ObjectNode`]s. Rendering and the file write happen afterwards.
//!
//! The file is truncated and rewritten in place; a crash mid-write can leave
//! a partial document behind.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use super::escape::{escape_attribute, escape_text, needs_replacement};
use super::node::{ObjectNode, OBJECT_ELEMENT, ROOT_ELEMENT};
use crate::error::{NotesError, Result};
use crate::store::Store;

impl Store {
    /// Save the store to its persist path
    pub fn save(&self) -> Result<()> {
        let path = self.persist_path().ok_or(NotesError::NoPersistPath)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let nodes = self.snapshot();

        let mut buffer = Vec::new();
        write_document(&mut buffer, &nodes, self.indent)?;

        // Create the directory if it does not exist.
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| NotesError::io(parent, e))?;
        }

        let mut file = File::create(path).map_err(|e| NotesError::io(path, e))?;
        file.write_all(&buffer)
            .and_then(|_| file.flush())
            .map_err(|e| NotesError::io(path, e))?;

        log::info!("Saved {} object notes to {}", nodes.len(), path.display());
        Ok(())
    }

    /// Render the store as a notes document into `writer`
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let nodes = self.snapshot();
        write_document(writer, &nodes, self.indent)
    }

    /// Copy every record out under the lock, in enumeration order
    fn snapshot(&self) -> Vec<ObjectNode> {
        self.lock().iter().map(ObjectNode::from_record).collect()
    }
}

/// Write `<objects>` with one `<object>` per node.
///
/// Chars that XML 1.0 cannot represent are written as U+FFFD.
pub fn write_document<W: Write>(inner: W, nodes: &[ObjectNode], indent: usize) -> Result<()> {
    let mut writer = if indent > 0 {
        Writer::new_with_indent(inner, b' ', indent)
    } else {
        Writer::new(inner)
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_ELEMENT)))?;

    for node in nodes {
        if node.attributes().any(|(_, v)| needs_replacement(v)) || needs_replacement(&node.comment) {
            log::warn!(
                "Object note {:?} holds characters XML cannot store; saving them as U+FFFD",
                node.name.as_deref().unwrap_or_default()
            );
        }

        let mut element = BytesStart::new(OBJECT_ELEMENT);
        for (key, value) in node.attributes() {
            element.push_attribute(Attribute {
                key: QName(key.as_bytes()),
                value: Cow::Owned(escape_attribute(value).into_bytes()),
            });
        }

        writer.write_event(Event::Start(element))?;
        // Always emit the text event so the writer keeps the comment inline
        writer.write_event(Event::Text(BytesText::from_escaped(escape_text(&node.comment))))?;
        writer.write_event(Event::End(BytesEnd::new(OBJECT_ELEMENT)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let mut inner = writer.into_inner();
    inner.write_all(b"\n")?;
    inner.flush()?;
    Ok(())
}
