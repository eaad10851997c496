//! Substitution table used by the smelt built-in.

use indexmap::IndexMap;

use crate::core::Item;

/// A fixed item-to-item replacement table.
#[derive(Debug, Clone)]
pub struct SubstitutionTable {
    entries: IndexMap<Item, Item>,
}

impl Default for SubstitutionTable {
    /// The furnace: cobblestone smelts into stone.
    fn default() -> Self {
        Self::new().with_entry(Item::new("cobblestone"), Item::new("stone"))
    }
}

impl SubstitutionTable {
    /// An empty table.
    pub fn new() -> Self {
        Self { entries: IndexMap::new() }
    }

    pub fn with_entry(mut self, input: Item, output: Item) -> Self {
        self.insert(input, output);
        self
    }

    pub fn insert(&mut self, input: Item, output: Item) -> Option<Item> {
        self.entries.insert(input, output)
    }

    pub fn lookup(&self, input: &Item) -> Option<&Item> {
        self.entries.get(input)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
