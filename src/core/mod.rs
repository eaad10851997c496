//! Core types for the minecart virtual machine.
//!
//! This module defines the storage primitives the machine is built from:
//!
//! - **Item**: immutable value descriptor (kind, label, stack limit, payload)
//! - **ItemStack**: bounded counter for a single item
//! - **Inventory**: fixed-size ordered slots; the memory primitive
//! - **Container / BoxedItem**: shared interface and the box wrapper
//! - **ItemStore**: associative store from item identity to inventory
//! - **Error**: fault hierarchy
//!
//! # Layer 0 - No Internal Dependencies
//!
//! This module has no dependencies on other minecart modules,
//! allowing it to be imported by all other layers.

pub mod error;
pub mod item;
pub mod stack;
pub mod inventory;
pub mod container;
pub mod store;

// Re-export primary types at module level
pub use error::{VmError, VmResult, ErrorCategory, OperandSlot};
pub use item::{Item, Payload, DEFAULT_STACK_LIMIT, BOX_KIND, PAPER_KIND};
pub use stack::ItemStack;
pub use inventory::{Inventory, CHEST_SIZE};
pub use container::{Container, BoxedItem, box_items};
pub use store::ItemStore;
