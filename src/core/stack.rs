//! Slot type for the minecart virtual machine.
//!
//! An `ItemStack` is a bounded counter for a single item. A stack whose
//! count drops to zero keeps its old item around; it is still vacant for
//! every filtering and equality purpose and the next `add` overwrites it.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::item::Item;

/// A bounded homogeneous multiset of one item.
#[derive(Clone, Default)]
pub struct ItemStack {
    item: Option<Item>,
    count: u32,
}

impl ItemStack {
    /// Create a new vacant stack.
    pub fn new() -> Self {
        Self { item: None, count: 0 }
    }

    /// Get the number of units held.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Check if the stack is vacant.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Check if another unit of the held item would be rejected.
    pub fn is_full(&self) -> bool {
        match &self.item {
            Some(item) if self.count > 0 => self.count >= item.stack_limit(),
            _ => false,
        }
    }

    /// The held item, or `None` when the stack is vacant.
    pub fn item(&self) -> Option<&Item> {
        if self.count == 0 {
            None
        } else {
            self.item.as_ref()
        }
    }

    /// The raw slot item, which may be stale when the stack is vacant.
    pub fn slot_item(&self) -> Option<&Item> {
        self.item.as_ref()
    }

    /// Check if this stack currently holds `item`.
    #[inline]
    pub fn holds(&self, item: &Item) -> bool {
        self.item() == Some(item)
    }

    /// Add one unit of `item`.
    ///
    /// A vacant stack adopts `item`. Fails without mutation when the stack
    /// holds a different item or the increment would pass the stack limit.
    pub fn add(&mut self, item: Item) -> bool {
        let limit = match &self.item {
            Some(current) if self.count > 0 => {
                if *current != item {
                    return false;
                }
                current.stack_limit()
            }
            _ => item.stack_limit(),
        };
        if self.count + 1 > limit {
            return false;
        }
        if self.count == 0 {
            self.item = Some(item);
        }
        self.count += 1;
        true
    }

    /// Remove one unit, returning the held item.
    pub fn pull(&mut self) -> Option<Item> {
        if self.count == 0 {
            return None;
        }
        self.count -= 1;
        self.item.clone()
    }
}

impl PartialEq for ItemStack {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.item() == other.item()
    }
}

impl Eq for ItemStack {}

impl Hash for ItemStack {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.count.hash(state);
        self.item().hash(state);
    }
}

impl fmt::Debug for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.item() {
            Some(item) => write!(f, "({}, {})", item, self.count),
            None => write!(f, "()"),
        }
    }
}

impl fmt::Display for ItemStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.item() {
            None => write!(f, "()"),
            Some(item) if self.count == 1 => write!(f, "({})", item),
            Some(item) => write!(f, "({}, {})", item, self.count),
        }
    }
}
