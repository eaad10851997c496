//! Per-run machine state shared by every operation.

use serde::{Deserialize, Serialize};

use crate::core::ItemStore;
use crate::stdlib::{ChunkPolicy, SubstitutionTable};

use super::convention::RestoreOrder;

/// Configuration for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Memory layout written back after each call.
    pub restore_order: RestoreOrder,
    /// Group sizing used by permute.
    pub chunking: ChunkPolicy,
    /// Maximum number of dispatches the driver performs.
    pub max_iterations: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            restore_order: RestoreOrder::StateThenBox,
            chunking: ChunkPolicy::RunLength,
            max_iterations: 4,
        }
    }
}

impl MachineConfig {
    /// The layout and grouping of the first minecart program.
    pub fn original() -> Self {
        Self {
            restore_order: RestoreOrder::ResultsThenBox,
            chunking: ChunkPolicy::Fixed(ChunkPolicy::ORIGINAL_GROUP_SIZE),
            max_iterations: 4,
        }
    }

    pub fn with_restore_order(mut self, restore_order: RestoreOrder) -> Self {
        self.restore_order = restore_order;
        self
    }

    pub fn with_chunking(mut self, chunking: ChunkPolicy) -> Self {
        self.chunking = chunking;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Context passed by reference into every operation.
///
/// Built once per run; owns the associative store.
#[derive(Debug, Clone, Default)]
pub struct MachineContext {
    pub store: ItemStore,
    pub furnace: SubstitutionTable,
    pub config: MachineConfig,
}

impl MachineContext {
    pub fn new(config: MachineConfig) -> Self {
        Self {
            store: ItemStore::new(),
            furnace: SubstitutionTable::default(),
            config,
        }
    }

    pub fn with_furnace(mut self, furnace: SubstitutionTable) -> Self {
        self.furnace = furnace;
        self
    }
}
