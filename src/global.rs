//! Optional process-wide store
//!
//! Hosts that prefer a single shared instance initialize it once at startup;
//! everything else should own a [`Store`] directly.

use once_cell::sync::OnceCell;

use crate::config::NotesConfig;
use crate::store::Store;

static STORE: OnceCell<Store> = OnceCell::new();

/// Create the process-wide store. Later calls return the existing instance
/// and ignore `config`.
pub fn initialize(config: &NotesConfig) -> &'static Store {
    STORE.get_or_init(|| {
        log::debug!("Initializing process-wide notes store");
        Store::with_config(config)
    })
}

pub fn get() -> Option<&'static Store> {
    STORE.get()
}
