use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Key under which the API-key visibility flag is stored.
pub const SHOW_KEYS_KEY: &str = "api-docs:show-keys";
/// Key under which the selected output language is stored.
pub const LANGUAGE_KEY: &str = "api-docs:language";

/// The key/value contract a host uses to persist user preferences.
///
/// Keys are namespaced strings such as `api-docs:show-keys`. Values are
/// plain strings; callers own their encoding.
pub trait PreferenceStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn delete(&self, key: &str) -> Result<()>;
}

/// A process-local store, used when the host provides no persistence.
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> Error {
    Error::Preferences("preference store lock poisoned".to_string())
}

impl PreferenceStore for InMemoryPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_delete() {
        let store = InMemoryPreferences::new();
        assert_eq!(store.get(SHOW_KEYS_KEY).unwrap(), None);

        store.set(SHOW_KEYS_KEY, "true").unwrap();
        assert_eq!(store.get(SHOW_KEYS_KEY).unwrap().as_deref(), Some("true"));

        store.delete(SHOW_KEYS_KEY).unwrap();
        assert_eq!(store.get(SHOW_KEYS_KEY).unwrap(), None);
    }
}
