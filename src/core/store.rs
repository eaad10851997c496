//! Associative store backing the get and put built-ins.
//!
//! Maps an item, by identity, to the inventory filed under it. Entries are
//! kept in insertion order so iteration is as deterministic as the rest of
//! the machine.

use indexmap::IndexMap;

use super::inventory::Inventory;
use super::item::Item;

/// Storage for inventories keyed by item.
#[derive(Clone, Default, Debug)]
pub struct ItemStore {
    entries: IndexMap<Item, Inventory>,
}

impl ItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self { entries: IndexMap::new() }
    }

    /// Get the inventory under `key`, creating an empty chest if absent.
    pub fn get_or_default(&mut self, key: &Item) -> &mut Inventory {
        self.entries.entry(key.clone()).or_default()
    }

    /// Remove and return the inventory under `key`.
    ///
    /// Never inserts; a missing key yields `None`.
    pub fn take(&mut self, key: &Item) -> Option<Inventory> {
        self.entries.shift_remove(key)
    }

    /// File `inventory` under `key`, returning whatever was there before.
    pub fn put(&mut self, key: Item, inventory: Inventory) -> Option<Inventory> {
        self.entries.insert(key, inventory)
    }

    /// Check if a key has an entry.
    pub fn contains(&self, key: &Item) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &Item) -> Option<&Inventory> {
        self.entries.get(key)
    }

    /// Get the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Item> {
        self.entries.keys()
    }
}
