//! Built-in operations and the closed opcode table.
//!
//! Each built-in is a plain function over owned items, bound to the
//! calling convention with its arity:
//!
//! | opcode        | arity | arguments                 | returns              |
//! |---------------|-------|---------------------------|----------------------|
//! | `get(2)`      | 2     | item box, key box         | item box, key box    |
//! | `set(2)`      | 2     | item box, key box         | item box, key box    |
//! | `smelt(1)`    | 1     | item box                  | item box             |
//! | `permute(27)` | 27    | key box, 26 pool values   | one box per group    |

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{BoxedItem, Container, Inventory, Item, OperandSlot, VmError, VmResult};
use crate::vm::{Convention, MachineContext, Operation, Router};

/// The closed set of built-in operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Take an inventory out of the store into an item box.
    Get,
    /// File the contents of an item box in the store.
    Set,
    /// Replace every item of a box through the substitution table.
    Smelt,
    /// Regroup a pool of values by the runs of a key box.
    Permute,
}

impl Builtin {
    /// Registration order of the opcode table.
    pub const ALL: [Builtin; 4] = [Builtin::Get, Builtin::Set, Builtin::Smelt, Builtin::Permute];

    /// Opcode label, which doubles as the operation name.
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Get => "get(2)",
            Builtin::Set => "set(2)",
            Builtin::Smelt => "smelt(1)",
            Builtin::Permute => "permute(27)",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Builtin::Get | Builtin::Set => 2,
            Builtin::Smelt => 1,
            Builtin::Permute => 27,
        }
    }

    /// The opcode token: a paper labeled with the name.
    pub fn descriptor(&self) -> Item {
        Item::paper(self.name())
    }

    /// Recognize an opcode token.
    pub fn from_item(item: &Item) -> Option<Builtin> {
        Self::ALL.into_iter().find(|builtin| builtin.descriptor() == *item)
    }
}

impl Operation for Builtin {
    fn name(&self) -> &str {
        Builtin::name(self)
    }

    fn apply(&self, memory: &mut Inventory, ctx: &mut MachineContext) -> VmResult<()> {
        match self {
            Builtin::Get => Convention::new(self.name(), store_get).call(memory, ctx),
            Builtin::Set => Convention::new(self.name(), store_put).call(memory, ctx),
            Builtin::Smelt => Convention::new(self.name(), smelt).call(memory, ctx),
            Builtin::Permute => Convention::new(self.name(), permute).call(memory, ctx),
        }
    }
}

impl Router<Builtin> {
    /// The built-in opcode table in registration order.
    pub fn builtins() -> Self {
        Builtin::ALL
            .into_iter()
            .fold(Router::new(), |router, builtin| router.route(builtin.descriptor(), builtin))
    }
}

/// How permute sizes its output groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkPolicy {
    /// Each group takes as many values as its key run is long.
    #[default]
    RunLength,
    /// Each group takes a constant number of values.
    Fixed(usize),
}

impl ChunkPolicy {
    /// Group size used by the first minecart program.
    pub const ORIGINAL_GROUP_SIZE: usize = 27;

    /// Values taken for a key run of length `run`.
    pub fn chunk_size(&self, run: usize) -> usize {
        match self {
            ChunkPolicy::RunLength => run,
            ChunkPolicy::Fixed(size) => *size,
        }
    }
}

/// Open an argument that must be a box.
fn open(op: &str, slot: OperandSlot, item: Item) -> VmResult<BoxedItem> {
    BoxedItem::from_item(item).map_err(|found| VmError::not_a_box(op, slot, found))
}

fn pull_key(op: &str, key_box: &mut BoxedItem) -> VmResult<Item> {
    key_box
        .pull_item()
        .ok_or_else(|| VmError::missing_operand(op, OperandSlot::Key))
}

/// Pull every unit out of `source`, keeping what `target` accepts.
///
/// Returns the number of units dropped.
fn drain_all(source: &mut Inventory, target: &mut BoxedItem) -> usize {
    let mut dropped = 0;
    while let Some(item) = source.pull_item() {
        if !target.add_item(item) {
            dropped += 1;
        }
    }
    dropped
}

/// `get(2)`: move the inventory filed under the key into the item box.
///
/// The entry is removed from the store, and the key goes back into the
/// key box twice so the result can be fed to another lookup.
pub fn store_get(ctx: &mut MachineContext, [item_box, key_box]: [Item; 2]) -> VmResult<Vec<Item>> {
    let op = Builtin::Get.name();
    let mut item_box = open(op, OperandSlot::Argument(0), item_box)?;
    let mut key_box = open(op, OperandSlot::Argument(1), key_box)?;

    let key = pull_key(op, &mut key_box)?;
    let mut stored = ctx
        .store
        .take(&key)
        .ok_or_else(|| VmError::key_not_found(op, &key))?;
    for _ in 0..2 {
        if !key_box.add_item(key.clone()) {
            return Err(VmError::container_full(op, &key));
        }
    }

    let dropped = drain_all(&mut stored, &mut item_box);
    if dropped > 0 {
        warn!(operation = op, %key, dropped, "item box overflowed, units lost");
    }
    Ok(vec![item_box.into_item(), key_box.into_item()])
}

/// `set(2)`: drain the item box into the inventory filed under the key.
///
/// Creates the entry when the key is new. The key itself is consumed.
pub fn store_put(ctx: &mut MachineContext, [item_box, key_box]: [Item; 2]) -> VmResult<Vec<Item>> {
    let op = Builtin::Set.name();
    let mut item_box = open(op, OperandSlot::Argument(0), item_box)?;
    let mut key_box = open(op, OperandSlot::Argument(1), key_box)?;

    let key = pull_key(op, &mut key_box)?;
    let entry = ctx.store.get_or_default(&key);
    if !item_box.transfer_into(entry, None) {
        warn!(operation = op, %key, left = item_box.inventory().total_count(), "store entry full, units lost");
    }
    Ok(vec![item_box.into_item(), key_box.into_item()])
}

/// `smelt(1)`: replace every unit of the item box through the furnace.
///
/// An item without an entry is a fault; nothing is skipped.
pub fn smelt(ctx: &mut MachineContext, [item_box]: [Item; 1]) -> VmResult<Vec<Item>> {
    let op = Builtin::Smelt.name();
    let mut item_box = open(op, OperandSlot::Argument(0), item_box)?;

    let mut output = Inventory::chest();
    let mut dropped = 0usize;
    while let Some(item) = item_box.pull_item() {
        let replacement = ctx
            .furnace
            .lookup(&item)
            .ok_or_else(|| VmError::unknown_item(op, &item))?;
        if !output.add_item(replacement.clone()) {
            dropped += 1;
        }
    }
    if dropped > 0 {
        warn!(operation = op, dropped, "furnace output full, units lost");
    }
    output.transfer_into(&mut item_box, None);
    Ok(vec![item_box.into_item()])
}

/// `permute(27)`: regroup the pool by the runs of the key box.
///
/// The key box is emptied in scan order and split into runs of equal
/// items. Each run fills one new box from the pool, sized by the active
/// [`ChunkPolicy`]. Values still in the pool afterwards go into one last
/// box. Empty groups are not emitted.
pub fn permute(ctx: &mut MachineContext, args: [Item; 27]) -> VmResult<Vec<Item>> {
    let op = Builtin::Permute.name();
    let [keys, values @ ..] = args;
    let mut keys = open(op, OperandSlot::Argument(0), keys)?;

    let mut pool = Inventory::chest();
    for value in values {
        if !pool.add_item(value.clone()) {
            return Err(VmError::container_full(op, value));
        }
    }

    let chunking = ctx.config.chunking;
    let mut groups = Vec::new();
    for run in run_lengths(&mut keys) {
        let mut group = BoxedItem::new();
        pool.transfer_into(&mut group, Some(chunking.chunk_size(run)));
        if !group.is_empty() {
            groups.push(group.into_item());
        }
    }
    if !pool.is_empty() {
        let mut rest = BoxedItem::new();
        pool.transfer_into(&mut rest, None);
        groups.push(rest.into_item());
    }
    Ok(groups)
}

/// Empty `keys` and return the lengths of its runs of equal items.
pub fn run_lengths<C: Container>(keys: &mut C) -> Vec<usize> {
    let mut runs: Vec<usize> = Vec::new();
    let mut current: Option<Item> = None;
    while let Some(key) = keys.pull_item() {
        if current.as_ref() == Some(&key) {
            if let Some(run) = runs.last_mut() {
                *run += 1;
            }
        } else {
            runs.push(1);
            current = Some(key);
        }
    }
    runs
}
