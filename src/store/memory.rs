use super::StateStore;
use anyhow::Result;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// In-memory store. Clones share the same records, which lets a test
/// hand one clone to a controller and inspect or reuse it afterwards.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }
}

impl StateStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&mut self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}
