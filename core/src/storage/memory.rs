use std::collections::HashMap;
#[cfg(test)]
use std::{cell::Cell, rc::Rc};

use super::KeyValueStore;
use crate::Result;

/// Non-persistent slots, used by tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Slots whose writes fail while `failing` is set
#[cfg(test)]
pub(crate) struct FailingStore {
    inner: MemoryStore,
    pub failing: Rc<Cell<bool>>,
}

#[cfg(test)]
impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            failing: Rc::new(Cell::new(false)),
        }
    }
}

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.failing.get() {
            return Err(crate::Error::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )));
        }
        self.inner.set(key, value)
    }
}
