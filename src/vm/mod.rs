//! The minecart machine: calling convention and opcode dispatch.
//!
//! # Architecture
//!
//! Shared memory is a single [`Inventory`](crate::core::Inventory). The
//! router scans it for an opcode token and hands control to the bound
//! [`Operation`]. Built-in operations are plain functions wrapped in a
//! [`Convention`], which pops operands off memory, runs the function, and
//! writes the continuation and results back.
//!
//! Per-run state (the associative store, the substitution table and the
//! active policies) lives in a [`MachineContext`] passed into every call.

pub mod context;
pub mod convention;
pub mod router;
pub mod traits;

pub use context::{MachineConfig, MachineContext};
pub use convention::{Convention, RestoreOrder};
pub use router::{Route, Router};
pub use traits::Operation;
