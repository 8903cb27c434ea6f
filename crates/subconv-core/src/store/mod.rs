//! Flat key-value persistence for history and saved settings.
//!
//! Values are JSON strings addressed by fixed key names. Writes replace the
//! whole value (last write wins); there is no locking because the tool is
//! single-user and operations run one at a time.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// Store key for the conversion history list.
pub const HISTORY_KEY: &str = "clash_converter_history";
/// Store key for the saved template selection.
pub const CONFIG_KEY: &str = "clash_converter_config";

/// Minimal key-value capability. Any backend with get/set/remove semantics fits.
pub trait KeyValueStore {
    /// Value for `key`, or `None` if it was never set (or removed).
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
