//! In-memory note collection guarded by one exclusive lock
//!
//! All structural changes and enumeration go through a [`StoreGuard`], which
//! holds the store's mutex for its lifetime. The single-call helpers on
//! [`Store`] take the lock for just that call and hand back owned snapshots.

pub mod key;

pub use key::RecordKey;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::config::NotesConfig;
use crate::models::Record;

/// Keyed collection of object notes
#[derive(Debug)]
pub struct Store {
    objects: Mutex<HashMap<RecordKey, Record>>,
    // Never held together with `objects`
    persist_path: Mutex<Option<PathBuf>>,
    pub(crate) indent: usize,
}

impl Store {
    pub fn new() -> Self {
        Self::with_config(&NotesConfig::default())
    }

    pub fn with_config(config: &NotesConfig) -> Self {
        Self {
            objects: Mutex::new(HashMap::with_capacity(config.initial_capacity)),
            persist_path: Mutex::new(config.persist_path.clone()),
            indent: config.indent,
        }
    }

    /// Acquire the exclusive lock; it is released when the guard drops
    pub fn lock(&self) -> StoreGuard<'_> {
        let objects = self.objects.lock().unwrap_or_else(|poisoned| {
            log::warn!("Notes store lock was poisoned, recovering");
            poisoned.into_inner()
        });
        StoreGuard { objects }
    }

    pub fn count(&self) -> usize {
        self.lock().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Snapshot of the record for `(tag, name)`, if any
    pub fn lookup(&self, tag: u32, name: &str) -> Option<Record> {
        self.lock().lookup(tag, name).cloned()
    }

    /// See [`StoreGuard::create_or_update`]; returns a snapshot of the record
    pub fn create_or_update(&self, tag: u32, name: &str, comment: Option<String>) -> Record {
        self.lock().create_or_update(tag, name, comment).clone()
    }

    /// Run `f` against the stored record while holding the lock
    pub fn update<F, R>(&self, tag: u32, name: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut Record) -> R,
    {
        self.lock().lookup_mut(tag, name).map(f)
    }

    /// Returns true if a record was removed
    pub fn delete(&self, tag: u32, name: &str) -> bool {
        self.lock().delete(tag, name).is_some()
    }

    pub fn set_persist_path(&self, path: impl Into<PathBuf>) {
        *self.path_slot() = Some(path.into());
    }

    pub fn persist_path(&self) -> Option<PathBuf> {
        self.path_slot().clone()
    }

    fn path_slot(&self) -> MutexGuard<'_, Option<PathBuf>> {
        self.persist_path
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive access to the records of a [`Store`]
pub struct StoreGuard<'a> {
    objects: MutexGuard<'a, HashMap<RecordKey, Record>>,
}

impl<'a> StoreGuard<'a> {
    pub fn lookup(&self, tag: u32, name: &str) -> Option<&Record> {
        self.objects.get(&RecordKey::new(tag, name))
    }

    pub fn lookup_mut(&mut self, tag: u32, name: &str) -> Option<&mut Record> {
        self.objects.get_mut(&RecordKey::new(tag, name))
    }

    /// Find the record for `(tag, name)`, creating it if absent.
    ///
    /// An existing record keeps its comment unless `comment` is `Some`, in
    /// which case the old comment is dropped and replaced. A new record gets
    /// the sentinel back color, zeroed numeric fields, and the supplied
    /// comment (empty if `None`).
    pub fn create_or_update(&mut self, tag: u32, name: &str, comment: Option<String>) -> &mut Record {
        match self.objects.entry(RecordKey::new(tag, name)) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                if let Some(comment) = comment {
                    record.replace_comment(comment);
                }
                record
            }
            Entry::Vacant(entry) => {
                let mut record = Record::new(tag, name);
                if let Some(comment) = comment {
                    record.comment = comment;
                }
                entry.insert(record)
            }
        }
    }

    /// Remove and return the record for `(tag, name)`
    pub fn delete(&mut self, tag: u32, name: &str) -> Option<Record> {
        self.objects.remove(&RecordKey::new(tag, name))
    }

    pub fn count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Records in internal order (unspecified, not stable across runs)
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.objects.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Record> {
        self.objects.values_mut()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NO_BACK_COLOR;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_create_or_update_same_key_same_record() {
        let store = Store::new();
        let mut guard = store.lock();

        let record = guard.create_or_update(1, "A", None);
        record.priority_class = 4;

        let again = guard.create_or_update(1, "A", None);
        assert_eq!(again.priority_class, 4);

        let folded = guard.create_or_update(1, "a", None);
        assert_eq!(folded.priority_class, 4);
        // Original spelling is kept
        assert_eq!(folded.name, "A");

        assert_eq!(guard.count(), 1);
    }

    #[test]
    fn test_different_tag_is_distinct() {
        let store = Store::new();
        let mut guard = store.lock();

        guard.create_or_update(1, "A", None).priority_class = 4;
        let other = guard.create_or_update(2, "A", None);
        assert_eq!(other.priority_class, 0);
        assert_eq!(guard.count(), 2);
    }

    #[test]
    fn test_comment_defaulting_and_replacement() {
        let store = Store::new();

        let record = store.create_or_update(5, "X", None);
        assert_eq!(record.comment, "");
        assert_eq!(record.back_color, NO_BACK_COLOR);

        store.update(5, "X", |r| {
            r.collapse = true;
            r.affinity_mask = 0b1010;
        });

        let record = store.create_or_update(5, "X", Some("hello".to_string()));
        assert_eq!(record.comment, "hello");
        assert!(record.collapse);
        assert_eq!(record.affinity_mask, 0b1010);
        assert_eq!(record.back_color, NO_BACK_COLOR);

        // No comment supplied leaves the existing one
        let record = store.create_or_update(5, "x", None);
        assert_eq!(record.comment, "hello");
    }

    #[test]
    fn test_lookup_missing_is_none() {
        let store = Store::new();
        assert!(store.lookup(1, "missing").is_none());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_delete_then_lookup() {
        let store = Store::new();
        store.create_or_update(1, "keep", None);
        store.create_or_update(1, "drop", Some("bye".to_string()));
        assert_eq!(store.count(), 2);

        let removed = store.lock().delete(1, "DROP").expect("record should exist");
        assert_eq!(removed.comment, "bye");

        assert!(store.lookup(1, "drop").is_none());
        assert_eq!(store.count(), 1);
        assert!(!store.delete(1, "drop"));
    }

    #[test]
    fn test_update_missing_record() {
        let store = Store::new();
        assert_eq!(store.update(1, "none", |r| r.collapse = true), None);
    }

    #[test]
    fn test_persist_path() {
        let store = Store::new();
        assert_eq!(store.persist_path(), None);
        store.set_persist_path("/tmp/notes.xml");
        assert_eq!(store.persist_path(), Some(PathBuf::from("/tmp/notes.xml")));
    }

    #[test]
    fn test_concurrent_create_or_update() {
        let store = Arc::new(Store::new());
        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..50u32 {
                        // Every thread touches the shared names, plus its own
                        store.create_or_update(0, &format!("shared-{}", i), None);
                        store.create_or_update(t + 1, &format!("own-{}", i), None);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker panicked");
        }

        assert_eq!(store.count(), 50 + 8 * 50);
    }

    #[test]
    fn test_lock_recovers_from_poison() {
        let store = Arc::new(Store::new());
        store.create_or_update(1, "survivor", None);

        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(store.count(), 1);
        assert!(store.lookup(1, "survivor").is_some());
    }
}
