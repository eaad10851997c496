//! Opcode dispatch.
//!
//! The router holds an ordered table of `(descriptor, operation)` routes.
//! Dispatch walks the table in registration order and runs the first
//! route whose descriptor can be pulled from memory. The pulled token is
//! pushed straight back so the operation finds it as its return token.

use tracing::debug;

use crate::core::{Inventory, Item, VmError, VmResult};

use super::context::MachineContext;
use super::traits::Operation;

/// An opcode descriptor bound to an operation.
#[derive(Debug, Clone)]
pub struct Route<O> {
    pub descriptor: Item,
    pub operation: O,
}

/// Ordered opcode table.
#[derive(Debug, Clone)]
pub struct Router<O> {
    routes: Vec<Route<O>>,
}

impl<O> Default for Router<O> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<O: Operation> Router<O> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route; earlier routes win.
    pub fn route(mut self, descriptor: Item, operation: O) -> Self {
        self.routes.push(Route { descriptor, operation });
        self
    }

    pub fn routes(&self) -> &[Route<O>] {
        &self.routes
    }

    /// Find the first route whose opcode is in memory.
    ///
    /// The matching token is pulled and pushed back; memory is otherwise
    /// untouched. Returns the route index.
    pub fn select(&self, memory: &mut Inventory) -> VmResult<Option<usize>> {
        for (index, route) in self.routes.iter().enumerate() {
            if let Some(token) = memory.pull_filtered(&route.descriptor) {
                if !memory.add_item(token.clone()) {
                    return Err(VmError::container_full(route.operation.name(), token));
                }
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Run the first matching route.
    ///
    /// Returns the descriptor that matched, or `None` when no opcode is
    /// present and the machine should halt.
    pub fn dispatch(&self, memory: &mut Inventory, ctx: &mut MachineContext) -> VmResult<Option<&Item>> {
        let Some(index) = self.select(memory)? else {
            debug!("no opcode matched");
            return Ok(None);
        };
        let route = &self.routes[index];
        debug!(opcode = %route.descriptor, operation = route.operation.name(), "dispatching");
        route.operation.apply(memory, ctx)?;
        Ok(Some(&route.descriptor))
    }
}
