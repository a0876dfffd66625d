use std::collections::HashMap;
use std::sync::RwLock;

use super::KeyValueStore;
use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        slots.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
