// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: VM (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod vm;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: Standard Library (depends on core, vm)
// ═══════════════════════════════════════════════════════════════════════════
pub mod stdlib;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 3: Runtime (depends on all)
// ═══════════════════════════════════════════════════════════════════════════
pub mod runtime;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use core::error::{VmError, VmResult, ErrorCategory, OperandSlot};
pub use core::{Item, Payload, ItemStack, Inventory, Container, BoxedItem, ItemStore,
               box_items, CHEST_SIZE, DEFAULT_STACK_LIMIT};
pub use vm::{Convention, MachineConfig, MachineContext, Operation, RestoreOrder, Route, Router};
pub use stdlib::{Builtin, ChunkPolicy, SubstitutionTable};
pub use runtime::{Driver, Program, RunOutcome, RunReport, Snapshot};
