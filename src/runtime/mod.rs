//! Runtime layer for the minecart machine.
//!
//! - **Driver**: the dispatch loop, its stop conditions and snapshots
//! - **Programs**: seed memories for demonstration runs

pub mod driver;
pub mod programs;

pub use driver::{Driver, RunOutcome, RunReport, Snapshot};
pub use programs::Program;
