//! The driving loop.
//!
//! Repeatedly dispatches against one shared memory until no opcode
//! matches, an operation faults, or the iteration cap is reached. Every
//! successful dispatch is recorded as a [`Snapshot`] of the rendered
//! memory.

use serde::Serialize;
use tracing::{error, info};

use crate::core::{Inventory, VmError};
use crate::stdlib::Builtin;
use crate::vm::{MachineConfig, MachineContext, Operation, Router};

/// Memory as it looked after one dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// 0 for the initial condition, then 1 per dispatch.
    pub iteration: usize,
    /// Label of the opcode that ran, `None` for the initial condition.
    pub opcode: Option<String>,
    /// Rendered memory.
    pub memory: String,
}

/// Why the loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No opcode matched.
    Halted { iterations: usize },
    /// The configured maximum number of dispatches ran.
    IterationCap { iterations: usize },
    /// The dispatch numbered `iteration` faulted.
    Faulted { iteration: usize, error: VmError },
}

impl RunOutcome {
    /// Number of dispatches that completed.
    pub fn iterations(&self) -> usize {
        match self {
            RunOutcome::Halted { iterations } | RunOutcome::IterationCap { iterations } => *iterations,
            RunOutcome::Faulted { iteration, .. } => iteration - 1,
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, RunOutcome::Faulted { .. })
    }

    pub fn error(&self) -> Option<&VmError> {
        match self {
            RunOutcome::Faulted { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Short machine-readable tag.
    pub fn kind(&self) -> &'static str {
        match self {
            RunOutcome::Halted { .. } => "halted",
            RunOutcome::IterationCap { .. } => "iteration-cap",
            RunOutcome::Faulted { .. } => "faulted",
        }
    }
}

/// Result of a run: the stop reason and every snapshot taken.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub snapshots: Vec<Snapshot>,
}

impl RunReport {
    /// The last recorded memory rendering.
    pub fn final_memory(&self) -> Option<&str> {
        self.snapshots.last().map(|snapshot| snapshot.memory.as_str())
    }
}

/// Drives a router against shared memory.
pub struct Driver<O = Builtin> {
    router: Router<O>,
    context: MachineContext,
}

impl Driver<Builtin> {
    /// A driver over the built-in opcode table.
    pub fn new(config: MachineConfig) -> Self {
        Self::with_router(Router::builtins(), MachineContext::new(config))
    }
}

impl<O: Operation> Driver<O> {
    pub fn with_router(router: Router<O>, context: MachineContext) -> Self {
        Self { router, context }
    }

    pub fn context(&self) -> &MachineContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut MachineContext {
        &mut self.context
    }

    pub fn router(&self) -> &Router<O> {
        &self.router
    }

    /// Run to completion, collecting snapshots.
    pub fn run(&mut self, memory: &mut Inventory) -> RunReport {
        self.run_with(memory, |_| {})
    }

    /// Run to completion, handing each snapshot to `observer` as it is taken.
    pub fn run_with<F>(&mut self, memory: &mut Inventory, mut observer: F) -> RunReport
    where
        F: FnMut(&Snapshot),
    {
        let max_iterations = self.context.config.max_iterations;
        let initial = Snapshot {
            iteration: 0,
            opcode: None,
            memory: memory.to_string(),
        };
        observer(&initial);
        let mut snapshots = vec![initial];

        let mut iterations = 0;
        let outcome = loop {
            if iterations >= max_iterations {
                info!(iterations, "iteration cap reached");
                break RunOutcome::IterationCap { iterations };
            }
            match self.router.dispatch(memory, &mut self.context) {
                Ok(Some(opcode)) => {
                    iterations += 1;
                    let snapshot = Snapshot {
                        iteration: iterations,
                        opcode: Some(opcode.label().to_string()),
                        memory: memory.to_string(),
                    };
                    info!(iteration = iterations, opcode = opcode.label(), "dispatched");
                    observer(&snapshot);
                    snapshots.push(snapshot);
                }
                Ok(None) => {
                    info!(iterations, "halted: no opcode in memory");
                    break RunOutcome::Halted { iterations };
                }
                Err(err) => {
                    error!(iteration = iterations + 1, code = err.code(), category = %err.category(), "{}", err);
                    break RunOutcome::Faulted {
                        iteration: iterations + 1,
                        error: err,
                    };
                }
            }
        };

        RunReport { outcome, snapshots }
    }
}
