//! Calling convention: turning a function into a memory-mutating operation.
//!
//! A call reads its operands off the front of shared memory:
//!
//! ```text
//! [dest, arg_0 .. arg_{N-1}, next_box <next_dest>, saved state ...]
//! ```
//!
//! `dest` is the return token (the opcode the router put back), `next_box`
//! is a boxed item holding the token to run next. Everything after it is
//! saved in a scratch inventory while the function runs. Afterwards memory
//! is rebuilt with `next_dest` in front, and `dest` is seated inside the
//! box so the continuation chain can be walked back.
//!
//! Where the box, the saved state and the results land relative to each
//! other is a [`RestoreOrder`] policy.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{BoxedItem, Container, Inventory, Item, OperandSlot, VmError, VmResult};

use super::context::MachineContext;
use super::traits::Operation;

/// Memory layout written back after a call.
///
/// Every order starts with `next_dest`; the box always carries `dest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestoreOrder {
    /// `next_dest, saved..., next_box, results...`
    #[default]
    StateThenBox,
    /// `next_dest, next_box, saved..., results...`
    BoxThenState,
    /// `next_dest, saved..., results..., next_box`
    ResultsThenBox,
}

/// Adapter binding an `N`-argument function to the calling convention.
pub struct Convention<const N: usize, F> {
    name: &'static str,
    function: F,
}

impl<const N: usize, F> Convention<N, F>
where
    F: Fn(&mut MachineContext, [Item; N]) -> VmResult<Vec<Item>>,
{
    pub fn new(name: &'static str, function: F) -> Self {
        Self { name, function }
    }

    /// Number of arguments popped per call.
    pub const fn arity(&self) -> usize {
        N
    }

    /// Pop operands, run the function, and rebuild memory.
    pub fn call(&self, memory: &mut Inventory, ctx: &mut MachineContext) -> VmResult<()> {
        let op = self.name;

        let dest = pop(memory, op, OperandSlot::ReturnToken)?;
        let mut args = Vec::with_capacity(N);
        for index in 0..N {
            args.push(pop(memory, op, OperandSlot::Argument(index))?);
        }
        let args = <[Item; N]>::try_from(args)
            .map_err(|short| VmError::missing_operand(op, OperandSlot::Argument(short.len())))?;

        let next_box = pop(memory, op, OperandSlot::ContinuationBox)?;
        let mut next_box = BoxedItem::from_item(next_box)
            .map_err(|found| VmError::not_a_box(op, OperandSlot::ContinuationBox, found))?;
        let next_dest = next_box
            .pull_item()
            .ok_or_else(|| VmError::missing_operand(op, OperandSlot::ContinuationToken))?;

        let mut saved = Inventory::new(memory.size());
        if !memory.transfer_into(&mut saved, None) {
            return Err(VmError::container_full(op, "saved state"));
        }
        trace!(operation = op, %dest, %next_dest, saved = saved.total_count(), "operands popped");

        let results = (self.function)(ctx, args)?;
        trace!(operation = op, results = results.len(), "function returned");

        if !next_box.add_item(dest.clone()) {
            return Err(VmError::container_full(op, dest));
        }
        let frame = Frame {
            op,
            next_dest,
            saved,
            next_box: next_box.into_item(),
            results,
        };
        frame.restore(memory, ctx.config.restore_order)
    }
}

impl<const N: usize, F> Operation for Convention<N, F>
where
    F: Fn(&mut MachineContext, [Item; N]) -> VmResult<Vec<Item>>,
{
    fn name(&self) -> &str {
        self.name
    }

    fn apply(&self, memory: &mut Inventory, ctx: &mut MachineContext) -> VmResult<()> {
        self.call(memory, ctx)
    }
}

/// Everything written back to memory once the function has returned.
struct Frame {
    op: &'static str,
    next_dest: Item,
    saved: Inventory,
    next_box: Item,
    results: Vec<Item>,
}

impl Frame {
    fn restore(self, memory: &mut Inventory, order: RestoreOrder) -> VmResult<()> {
        let Frame { op, next_dest, mut saved, next_box, results } = self;

        push(memory, op, next_dest)?;
        match order {
            RestoreOrder::StateThenBox => {
                drain(&mut saved, memory, op)?;
                push(memory, op, next_box)?;
                push_all(memory, op, results)?;
            }
            RestoreOrder::BoxThenState => {
                push(memory, op, next_box)?;
                drain(&mut saved, memory, op)?;
                push_all(memory, op, results)?;
            }
            RestoreOrder::ResultsThenBox => {
                drain(&mut saved, memory, op)?;
                push_all(memory, op, results)?;
                push(memory, op, next_box)?;
            }
        }
        Ok(())
    }
}

fn pop(memory: &mut Inventory, op: &str, slot: OperandSlot) -> VmResult<Item> {
    memory
        .pull_item()
        .ok_or_else(|| VmError::missing_operand(op, slot))
}

fn push(memory: &mut Inventory, op: &str, item: Item) -> VmResult<()> {
    if memory.add_item(item.clone()) {
        Ok(())
    } else {
        Err(VmError::container_full(op, item))
    }
}

fn push_all(memory: &mut Inventory, op: &str, items: Vec<Item>) -> VmResult<()> {
    items.into_iter().try_for_each(|item| push(memory, op, item))
}

fn drain(saved: &mut Inventory, memory: &mut Inventory, op: &str) -> VmResult<()> {
    if saved.transfer_into(memory, None) {
        Ok(())
    } else {
        Err(VmError::container_full(op, "saved state"))
    }
}
