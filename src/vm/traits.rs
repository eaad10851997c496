//! The operation interface the router dispatches to.
//!
//! Anything bound to an opcode implements [`Operation`]: it receives the
//! shared memory with the opcode token already back in place, plus the
//! machine context holding the store and the active policies.

use crate::core::{Inventory, VmResult};

use super::context::MachineContext;

/// An inventory-mutating operation bound to an opcode.
pub trait Operation {
    /// Name used in faults and logs.
    fn name(&self) -> &str;

    /// Run against shared memory.
    fn apply(&self, memory: &mut Inventory, ctx: &mut MachineContext) -> VmResult<()>;
}

impl<O: Operation + ?Sized> Operation for &O {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply(&self, memory: &mut Inventory, ctx: &mut MachineContext) -> VmResult<()> {
        (**self).apply(memory, ctx)
    }
}

impl<O: Operation + ?Sized> Operation for Box<O> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn apply(&self, memory: &mut Inventory, ctx: &mut MachineContext) -> VmResult<()> {
        (**self).apply(memory, ctx)
    }
}
