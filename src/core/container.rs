//! The container interface and the boxed-item wrapper.
//!
//! A boxed item is an [`Item`] whose payload is an [`Inventory`]. Items are
//! immutable, so a box is mutated by pulling it out of whatever holds it,
//! opening it as a [`BoxedItem`], working on it through [`Container`], and
//! turning it back into an item.

use super::inventory::Inventory;
use super::item::Item;

/// Operations shared by anything that holds item stacks.
pub trait Container {
    /// Add one unit to the first slot that accepts it.
    fn add_item(&mut self, item: Item) -> bool;

    /// Pull one unit from the first occupied slot.
    fn pull_item(&mut self) -> Option<Item>;

    /// Pull one unit from the first occupied slot holding `descriptor`.
    fn pull_filtered(&mut self, descriptor: &Item) -> Option<Item>;

    /// Move units into `target`; true iff this container ends up empty.
    fn transfer_into<C: Container + ?Sized>(&mut self, target: &mut C, limit: Option<usize>) -> bool;

    /// Check if every slot is vacant.
    fn is_empty(&self) -> bool;
}

/// An opened box: the owned inventory of a boxed item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoxedItem {
    inventory: Inventory,
}

impl BoxedItem {
    /// An empty 27-slot box.
    pub fn new() -> Self {
        Self { inventory: Inventory::chest() }
    }

    pub fn with_inventory(inventory: Inventory) -> Self {
        Self { inventory }
    }

    /// Open a boxed item, handing a plain item back unchanged.
    pub fn from_item(item: Item) -> Result<Self, Item> {
        item.into_inventory().map(Self::with_inventory)
    }

    /// Close the box back into an item.
    pub fn into_item(self) -> Item {
        Item::boxed(self.inventory)
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }
}

impl From<BoxedItem> for Item {
    fn from(boxed: BoxedItem) -> Self {
        boxed.into_item()
    }
}

impl Container for BoxedItem {
    fn add_item(&mut self, item: Item) -> bool {
        self.inventory.add_item(item)
    }

    fn pull_item(&mut self) -> Option<Item> {
        self.inventory.pull_item()
    }

    fn pull_filtered(&mut self, descriptor: &Item) -> Option<Item> {
        self.inventory.pull_filtered(descriptor)
    }

    fn transfer_into<C: Container + ?Sized>(&mut self, target: &mut C, limit: Option<usize>) -> bool {
        self.inventory.transfer_into(target, limit)
    }

    fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }
}

/// Build a box holding `mult` passes over `items`.
///
/// Units that do not fit are left out.
pub fn box_items(items: &[Item], mult: usize) -> BoxedItem {
    let mut boxed = BoxedItem::new();
    for _ in 0..mult {
        for item in items {
            boxed.add_item(item.clone());
        }
    }
    boxed
}
