//! Notes document → store
//!
//! The whole document is parsed with roxmltree before the store is touched,
//! so a corrupt file never produces a partial merge.

use std::fs;
use std::io::Read;
use std::path::Path;

use roxmltree::Document as XmlDocument;

use super::node::{ObjectNode, ROOT_ELEMENT};
use crate::error::{NotesError, Result};
use crate::store::Store;

impl Store {
    /// Load the document at the persist path into the store.
    ///
    /// Returns the number of records created or updated.
    pub fn load(&self) -> Result<usize> {
        let path = self.persist_path().ok_or(NotesError::NoPersistPath)?;
        self.load_from_path(&path)
    }

    pub fn load_from_path(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| NotesError::io(path, e))?;
        log::debug!("Read {} bytes of object notes from {}", bytes.len(), path.display());
        self.load_from_bytes(&bytes)
    }

    pub fn load_from_reader<R: Read>(&self, mut reader: R) -> Result<usize> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.load_from_bytes(&bytes)
    }

    pub fn load_from_bytes(&self, bytes: &[u8]) -> Result<usize> {
        // A blank file is OK. There are no objects to load.
        if bytes.is_empty() {
            return Ok(0);
        }

        let xml = std::str::from_utf8(bytes)
            .map_err(|e| NotesError::CorruptFormat(format!("not valid UTF-8: {}", e)))?;
        self.load_from_str(xml)
    }

    pub fn load_from_str(&self, xml: &str) -> Result<usize> {
        if xml.is_empty() {
            return Ok(0);
        }

        let xml = xml.strip_prefix('\u{FEFF}').unwrap_or(xml);
        let doc = XmlDocument::parse(xml).map_err(|e| NotesError::CorruptFormat(e.to_string()))?;

        let root = doc.root_element();
        if root.tag_name().name() != ROOT_ELEMENT {
            log::warn!(
                "Notes document root is <{}>, expected <{}>; loading its children anyway",
                root.tag_name().name(),
                ROOT_ELEMENT
            );
        }

        let mut applied = 0;
        let mut skipped = 0;
        {
            let mut guard = self.lock();
            for element in root.children().filter(|n| n.is_element()) {
                if ObjectNode::from_element(element).apply(&mut guard) {
                    applied += 1;
                } else {
                    skipped += 1;
                    log::debug!(
                        "Skipping <{}> at byte {}: missing tag or name",
                        element.tag_name().name(),
                        element.range().start
                    );
                }
            }
        }

        log::info!("Loaded {} object notes ({} skipped)", applied, skipped);
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NO_BACK_COLOR;

    #[test]
    fn test_load_full_object() {
        let store = Store::new();
        let applied = store
            .load_from_str(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<objects>
  <object tag="1" name="Notepad.exe" priorityclass="3" iopriorityplusone="2" backcolor="65280" collapse="1" affinity="15">Editor &amp; friends</object>
</objects>"#,
            )
            .unwrap();
        assert_eq!(applied, 1);

        let record = store.lookup(1, "notepad.exe").unwrap();
        assert_eq!(record.name, "Notepad.exe");
        assert_eq!(record.comment, "Editor & friends");
        assert_eq!(record.priority_class, 3);
        assert_eq!(record.io_priority_plus_one, 2);
        assert_eq!(record.back_color, 65280);
        assert!(record.collapse);
        assert_eq!(record.affinity_mask, 15);
    }

    #[test]
    fn test_missing_backcolor_is_sentinel() {
        let store = Store::new();
        store
            .load_from_str(r#"<objects><object tag="2" name="svc"/></objects>"#)
            .unwrap();

        let record = store.lookup(2, "svc").unwrap();
        assert_eq!(record.back_color, NO_BACK_COLOR);
        assert_eq!(record.comment, "");
    }

    #[test]
    fn test_empty_input_is_valid() {
        let store = Store::new();
        store.create_or_update(1, "existing", None);

        assert_eq!(store.load_from_bytes(b"").unwrap(), 0);
        assert_eq!(store.load_from_reader(std::io::empty()).unwrap(), 0);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_corrupt_input_leaves_store_intact() {
        let store = Store::new();
        store.create_or_update(1, "existing", Some("keep me".to_string()));

        for bad in [
            "just some text",
            "<objects><object tag=\"1\" name=\"x\">",
            "<objects></object>",
            "   ",
        ] {
            let err = store.load_from_str(bad).unwrap_err();
            assert!(err.is_corrupt(), "{:?} should be corrupt, got {:?}", bad, err);
        }

        assert_eq!(store.count(), 1);
        assert_eq!(store.lookup(1, "existing").unwrap().comment, "keep me");
    }

    #[test]
    fn test_invalid_utf8_is_corrupt() {
        let store = Store::new();
        let err = store.load_from_bytes(&[0x3c, 0xff, 0xfe, 0x3e]).unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_dropped_fields_without_identity() {
        let store = Store::new();
        let applied = store
            .load_from_str(
                r#"<objects>
  <object name="no-tag" backcolor="1" collapse="1" affinity="3"/>
  <object tag="5" backcolor="1" collapse="1" affinity="3">no name</object>
</objects>"#,
            )
            .unwrap();
        assert_eq!(applied, 0);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_load_merges_into_existing_records() {
        let store = Store::new();
        store.create_or_update(1, "svc", Some("old".to_string()));
        store.create_or_update(1, "other", None);

        store
            .load_from_str(r#"<objects><object tag="1" name="SVC" backcolor="7">new</object></objects>"#)
            .unwrap();

        assert_eq!(store.count(), 2);
        let record = store.lookup(1, "svc").unwrap();
        assert_eq!(record.comment, "new");
        assert_eq!(record.back_color, 7);
    }

    #[test]
    fn test_load_accepts_byte_order_mark() {
        let store = Store::new();
        store
            .load_from_str("\u{FEFF}<objects><object tag=\"1\" name=\"a\"/></objects>")
            .unwrap();
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_load_without_path() {
        let store = Store::new();
        assert!(matches!(store.load(), Err(NotesError::NoPersistPath)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new();
        store.set_persist_path(dir.path().join("usernotes.xml"));

        let err = store.load().unwrap_err();
        assert!(err.is_not_found());
    }
}
