//! Inventory type for the minecart virtual machine.
//!
//! An inventory is a fixed number of slots scanned in construction order.
//! Every operation is first-fit or first-match over that order, which is
//! what makes the machine deterministic.

use std::fmt;

use super::container::Container;
use super::item::Item;
use super::stack::ItemStack;

/// Slot count of a chest, the canonical inventory size.
pub const CHEST_SIZE: usize = 27;

/// A fixed-size ordered collection of item stacks.
///
/// Equality and hashing only look at occupied slots and their positions;
/// stale items left in vacant slots are ignored.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Inventory {
    stacks: Vec<ItemStack>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::chest()
    }
}

impl Inventory {
    /// Create an inventory with `size` vacant slots.
    pub fn new(size: usize) -> Self {
        Self {
            stacks: vec![ItemStack::new(); size],
        }
    }

    /// Create a 27-slot inventory.
    pub fn chest() -> Self {
        Self::new(CHEST_SIZE)
    }

    /// Number of slots.
    #[inline]
    pub fn size(&self) -> usize {
        self.stacks.len()
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    /// Add one unit to the first slot that accepts it.
    pub fn add_item(&mut self, item: Item) -> bool {
        // Find the slot first so a rejected add never has to give `item` back.
        let slot = self.stacks.iter().position(|stack| match stack.item() {
            None => item.stack_limit() > 0,
            Some(held) => *held == item && !stack.is_full(),
        });
        match slot {
            Some(index) => self.stacks[index].add(item),
            None => false,
        }
    }

    /// Pull one unit from the first occupied slot.
    pub fn pull_item(&mut self) -> Option<Item> {
        self.stacks.iter_mut().find_map(ItemStack::pull)
    }

    /// Pull one unit from the first occupied slot holding `descriptor`.
    pub fn pull_filtered(&mut self, descriptor: &Item) -> Option<Item> {
        self.stacks
            .iter_mut()
            .find(|stack| stack.holds(descriptor))
            .and_then(ItemStack::pull)
    }

    /// Move units into `target`, slot by slot.
    ///
    /// When `target` rejects a unit, that unit is dropped and the rest of
    /// the slot stays in place; the transfer carries on with the next slot.
    /// With a `limit`, the transfer stops once that many units have moved.
    ///
    /// Returns true iff this inventory ends up empty.
    pub fn transfer_into<C: Container + ?Sized>(&mut self, target: &mut C, limit: Option<usize>) -> bool {
        let mut moved = 0usize;
        'slots: for (index, stack) in self.stacks.iter_mut().enumerate() {
            loop {
                if limit.is_some_and(|limit| moved >= limit) {
                    break 'slots;
                }
                let Some(item) = stack.pull() else { break };
                if !target.add_item(item) {
                    tracing::trace!(slot = index, remaining = stack.count(), "transfer rejected, unit dropped");
                    break;
                }
                moved += 1;
            }
        }
        self.is_empty()
    }

    /// Check if every slot is vacant.
    pub fn is_empty(&self) -> bool {
        self.stacks.iter().all(ItemStack::is_empty)
    }

    /// Total units across all slots.
    pub fn total_count(&self) -> usize {
        self.stacks.iter().map(|stack| stack.count() as usize).sum()
    }

    /// Units of `item` across all slots.
    pub fn count_of(&self, item: &Item) -> usize {
        self.stacks
            .iter()
            .filter(|stack| stack.holds(item))
            .map(|stack| stack.count() as usize)
            .sum()
    }

    /// Occupied slots in scan order as `(item, count)`.
    pub fn items(&self) -> impl Iterator<Item = (&Item, u32)> {
        self.stacks
            .iter()
            .filter_map(|stack| stack.item().map(|item| (item, stack.count())))
    }
}

impl Container for Inventory {
    fn add_item(&mut self, item: Item) -> bool {
        Inventory::add_item(self, item)
    }

    fn pull_item(&mut self) -> Option<Item> {
        Inventory::pull_item(self)
    }

    fn pull_filtered(&mut self, descriptor: &Item) -> Option<Item> {
        Inventory::pull_filtered(self, descriptor)
    }

    fn transfer_into<C: Container + ?Sized>(&mut self, target: &mut C, limit: Option<usize>) -> bool {
        Inventory::transfer_into(self, target, limit)
    }

    fn is_empty(&self) -> bool {
        Inventory::is_empty(self)
    }
}

impl fmt::Debug for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only show occupied slots
        let occupied: Vec<_> = self.stacks.iter()
            .enumerate()
            .filter(|(_, stack)| !stack.is_empty())
            .collect();

        if occupied.is_empty() {
            write!(f, "Inventory{{{} vacant}}", self.size())
        } else {
            write!(f, "Inventory{{")?;
            for (i, (slot, stack)) in occupied.iter().enumerate() {
                if i > 0 { write!(f, ", ")?; }
                write!(f, "[{}]={:?}", slot, stack)?;
            }
            write!(f, "}}")
        }
    }
}

impl fmt::Display for Inventory {
    /// `[]` when empty, otherwise occupied slots joined by `,` with each
    /// inner run of vacant slots collapsed to `...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        let mut gap = false;
        for stack in &self.stacks {
            if stack.is_empty() {
                gap = !parts.is_empty();
                continue;
            }
            if gap {
                parts.push("...".to_string());
                gap = false;
            }
            parts.push(stack.to_string());
        }
        write!(f, "[{}]", parts.join(","))
    }
}
