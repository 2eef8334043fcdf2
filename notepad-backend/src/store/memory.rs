use dashmap::DashMap;

use super::{SlotStore, StoreResult};

/// Process-lifetime slot store. Everything is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    slots: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemoryStore {
    fn read(&self, slot: &str) -> StoreResult<Option<String>> {
        Ok(self.slots.get(slot).map(|v| v.value().clone()))
    }

    fn write(&self, slot: &str, value: &str) -> StoreResult<()> {
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
