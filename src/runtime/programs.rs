//! Demonstration seed programs.
//!
//! Each program is a starting memory. Together with the driver they show
//! the store, the furnace and the permutation built-ins in motion.

use serde::{Deserialize, Serialize};

use crate::core::{box_items, Inventory, Item};
use crate::stdlib::Builtin;
use crate::vm::{MachineConfig, RestoreOrder};

/// Built-in seed programs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Program {
    /// Store, then permute a store result. Faults on its second dispatch.
    Original,
    /// Alternate `set(2)` and `get(2)` on one key until the cap.
    StoreLoop,
    /// Smelt one box of cobblestone, then halt.
    SmeltOnce,
    /// Permute 26 pool values by a 7-run key box, then halt.
    PermuteGroups,
}

impl Program {
    pub const ALL: [Program; 4] = [
        Program::Original,
        Program::StoreLoop,
        Program::SmeltOnce,
        Program::PermuteGroups,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Program::Original => "original",
            Program::StoreLoop => "store-loop",
            Program::SmeltOnce => "smelt-once",
            Program::PermuteGroups => "permute-groups",
        }
    }

    /// The program's starting memory.
    pub fn seed(&self) -> Inventory {
        match self {
            Program::Original => original(),
            Program::StoreLoop => store_loop(),
            Program::SmeltOnce => smelt_once(),
            Program::PermuteGroups => permute_groups(),
        }
    }

    /// Configuration the program was written against.
    pub fn config(&self) -> MachineConfig {
        match self {
            Program::Original => MachineConfig::original(),
            Program::StoreLoop => {
                MachineConfig::default().with_restore_order(RestoreOrder::ResultsThenBox)
            }
            Program::SmeltOnce | Program::PermuteGroups => MachineConfig::default(),
        }
    }
}

fn key() -> Item {
    Item::paper("key")
}

fn cobblestone() -> Item {
    Item::new("cobblestone")
}

fn opcode(builtin: Builtin) -> Item {
    builtin.descriptor()
}

/// Keys whose runs are 1, 4, 4, 1, 1, 1, 1.
fn permutation_keys() -> Inventory {
    let mut keys = Inventory::chest();
    let runs: [(&str, usize); 7] = [("1", 1), ("2", 4), ("3", 4), ("4", 1), ("5", 1), ("6", 1), ("7", 1)];
    for (label, run) in runs {
        for _ in 0..run {
            keys.add_item(Item::paper(label));
        }
    }
    keys
}

/// `set(2)` a full stack of cobblestone, then `permute(27)`.
pub fn original() -> Inventory {
    let mut memory = Inventory::chest();
    memory.add_item(opcode(Builtin::Set));
    memory.add_item(box_items(&[cobblestone()], 64).into_item());
    memory.add_item(box_items(&[key()], 2).into_item());
    memory.add_item(box_items(&[opcode(Builtin::Permute)], 1).into_item());
    memory.add_item(Item::boxed(permutation_keys()));
    memory
}

/// `set(2)` and `get(2)` chained through each other's continuation box.
pub fn store_loop() -> Inventory {
    let mut memory = Inventory::chest();
    memory.add_item(opcode(Builtin::Set));
    memory.add_item(box_items(&[cobblestone()], 64).into_item());
    memory.add_item(box_items(&[key()], 2).into_item());
    memory.add_item(box_items(&[opcode(Builtin::Get)], 1).into_item());
    memory
}

/// `smelt(1)` sixteen cobblestone, continuing into a non-opcode.
pub fn smelt_once() -> Inventory {
    let mut memory = Inventory::chest();
    memory.add_item(opcode(Builtin::Smelt));
    memory.add_item(box_items(&[cobblestone()], 16).into_item());
    memory.add_item(box_items(&[Item::paper("halt")], 1).into_item());
    memory
}

/// `permute(27)` over thirteen cobblestone and thirteen stone.
pub fn permute_groups() -> Inventory {
    let mut memory = Inventory::chest();
    memory.add_item(opcode(Builtin::Permute));
    memory.add_item(Item::boxed(permutation_keys()));
    for _ in 0..13 {
        memory.add_item(cobblestone());
    }
    for _ in 0..13 {
        memory.add_item(Item::new("stone"));
    }
    memory.add_item(box_items(&[Item::paper("halt")], 1).into_item());
    memory
}
