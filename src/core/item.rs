//! Item type: the immutable value descriptor held by every slot.
//!
//! Identity is `kind`, `label` and `payload`. The stack limit only
//! governs how many units fit in one slot and is not part of identity,
//! so `Eq` and `Hash` are implemented by hand.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::inventory::Inventory;

/// Default number of units a single slot can hold.
pub const DEFAULT_STACK_LIMIT: u32 = 64;

/// Kind shared by every boxed item.
pub const BOX_KIND: &str = "Box";

/// Kind used for opcode and key tokens.
pub const PAPER_KIND: &str = "paper";

/// Optional value carried by an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Payload {
    /// Opaque text attached to the item.
    Tag(String),
    /// Nested memory region; makes the item a boxed item.
    Inventory(Inventory),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Tag(tag) => write!(f, "{}", tag),
            Payload::Inventory(inventory) => write!(f, "{}", inventory),
        }
    }
}

/// An immutable value descriptor.
#[derive(Debug, Clone)]
pub struct Item {
    kind: String,
    label: String,
    stack_limit: u32,
    payload: Option<Payload>,
}

impl Item {
    /// Create an item whose label defaults to its kind.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            label: kind.clone(),
            kind,
            stack_limit: DEFAULT_STACK_LIMIT,
            payload: None,
        }
    }

    /// Create an item with an explicit label.
    pub fn labeled(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
            stack_limit: DEFAULT_STACK_LIMIT,
            payload: None,
        }
    }

    /// A `paper` token with the given label.
    pub fn paper(label: impl Into<String>) -> Self {
        Self::labeled(PAPER_KIND, label)
    }

    /// A boxed item wrapping `inventory`.
    pub fn boxed(inventory: Inventory) -> Self {
        Self {
            kind: BOX_KIND.to_string(),
            label: BOX_KIND.to_string(),
            stack_limit: 1,
            payload: Some(Payload::Inventory(inventory)),
        }
    }

    pub fn with_stack_limit(mut self, stack_limit: u32) -> Self {
        self.stack_limit = stack_limit;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.payload = Some(Payload::Tag(tag.into()));
        self
    }

    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn stack_limit(&self) -> u32 {
        self.stack_limit
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Check if this item carries a nested inventory.
    pub fn is_box(&self) -> bool {
        matches!(self.payload, Some(Payload::Inventory(_)))
    }

    /// Borrow the nested inventory of a boxed item.
    pub fn inventory(&self) -> Option<&Inventory> {
        match &self.payload {
            Some(Payload::Inventory(inventory)) => Some(inventory),
            _ => None,
        }
    }

    /// Take the nested inventory out of a boxed item.
    ///
    /// Returns the item unchanged if it is not a box.
    pub fn into_inventory(self) -> Result<Inventory, Item> {
        match self.payload {
            Some(Payload::Inventory(inventory)) => Ok(inventory),
            payload => Err(Item { payload, ..self }),
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.label == other.label && self.payload == other.payload
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.label.hash(state);
        self.payload.hash(state);
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.kind != self.label {
            write!(f, ": \"{}\"", self.label)?;
        }
        if let Some(payload) = &self.payload {
            write!(f, " <{}>", payload)?;
        }
        Ok(())
    }
}
