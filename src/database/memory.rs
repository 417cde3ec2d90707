use std::collections::HashMap;

use parking_lot::Mutex;

use super::{Error, KeyValueStore};

/// Volatile store, for tests and previews
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), Error> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), Error> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("missing"), Ok(None));

        store.set("key", "one".into()).unwrap();
        store.set("key", "two".into()).unwrap();
        assert_eq!(store.get("key"), Ok(Some("two".to_string())));
        assert_eq!(store.len(), 1);

        store.delete("key").unwrap();
        assert!(!store.contains("key"));

        // deleting a missing key is fine
        store.delete("key").unwrap();
    }
}
