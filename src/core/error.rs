//! Fault types for the minecart virtual machine.
//!
//! The machine has two failure tiers:
//!
//! - **Local failures** (wrong item for a stack, capacity exceeded, empty pull,
//!   no matching opcode) are reported as `bool` / `Option` results and never
//!   mutate state. They do not appear here.
//! - **Faults** indicate a malformed program or machine state. They abort the
//!   current operation and propagate to the driver as a [`VmError`].
//!
//! # Error Categories
//!
//! - **Protocol**: the calling convention could not pop a mandatory operand
//! - **Store**: associative store lookups
//! - **Builtin**: built-in operation input that has no defined meaning
//! - **Capacity**: a container refused an item the protocol must place

use std::fmt;
use thiserror::Error;

/// Which mandatory pop of the calling convention came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandSlot {
    /// The return token popped first from memory.
    ReturnToken,
    /// The n-th argument (0-indexed).
    Argument(usize),
    /// The continuation box popped after the arguments.
    ContinuationBox,
    /// The token held inside the continuation box.
    ContinuationToken,
    /// A key token inside a key box.
    Key,
}

impl fmt::Display for OperandSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandSlot::ReturnToken => write!(f, "return token"),
            OperandSlot::Argument(i) => write!(f, "argument {}", i),
            OperandSlot::ContinuationBox => write!(f, "continuation box"),
            OperandSlot::ContinuationToken => write!(f, "continuation token"),
            OperandSlot::Key => write!(f, "key"),
        }
    }
}

/// Fault raised while executing an operation.
///
/// Items are carried in their rendered form so the error stays cheap to
/// clone and print.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// A mandatory pop found its container empty.
    #[error("[{operation}] missing operand: {slot}")]
    MissingOperand {
        operation: String,
        slot: OperandSlot,
    },

    /// An operand that must be a boxed item was a plain item.
    #[error("[{operation}] expected a box for {slot}, found {found}")]
    NotABox {
        operation: String,
        slot: OperandSlot,
        found: String,
    },

    /// A get targeted a key with nothing stored under it.
    #[error("[{operation}] key not found: {key}")]
    KeyNotFound {
        operation: String,
        key: String,
    },

    /// The substitution table has no entry for an item.
    #[error("[{operation}] unknown item: {item}")]
    UnknownItem {
        operation: String,
        item: String,
    },

    /// A container rejected an item the protocol had to place.
    #[error("[{operation}] container full: could not place {item}")]
    ContainerFull {
        operation: String,
        item: String,
    },
}

impl VmError {
    pub fn missing_operand(operation: &str, slot: OperandSlot) -> Self {
        VmError::MissingOperand {
            operation: operation.to_string(),
            slot,
        }
    }

    pub fn not_a_box(operation: &str, slot: OperandSlot, found: impl fmt::Display) -> Self {
        VmError::NotABox {
            operation: operation.to_string(),
            slot,
            found: found.to_string(),
        }
    }

    pub fn key_not_found(operation: &str, key: impl fmt::Display) -> Self {
        VmError::KeyNotFound {
            operation: operation.to_string(),
            key: key.to_string(),
        }
    }

    pub fn unknown_item(operation: &str, item: impl fmt::Display) -> Self {
        VmError::UnknownItem {
            operation: operation.to_string(),
            item: item.to_string(),
        }
    }

    pub fn container_full(operation: &str, item: impl fmt::Display) -> Self {
        VmError::ContainerFull {
            operation: operation.to_string(),
            item: item.to_string(),
        }
    }

    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            VmError::MissingOperand { .. } | VmError::NotABox { .. } => ErrorCategory::Protocol,
            VmError::KeyNotFound { .. } => ErrorCategory::Store,
            VmError::UnknownItem { .. } => ErrorCategory::Builtin,
            VmError::ContainerFull { .. } => ErrorCategory::Capacity,
        }
    }

    /// Get the error code for programmatic handling.
    pub fn code(&self) -> u32 {
        match self {
            // Protocol: 1000-1999
            VmError::MissingOperand { .. } => 1001,
            VmError::NotABox { .. } => 1002,

            // Store: 2000-2999
            VmError::KeyNotFound { .. } => 2001,

            // Builtin: 3000-3999
            VmError::UnknownItem { .. } => 3001,

            // Capacity: 4000-4999
            VmError::ContainerFull { .. } => 4001,
        }
    }

    /// Name of the operation that faulted.
    pub fn operation(&self) -> &str {
        match self {
            VmError::MissingOperand { operation, .. }
            | VmError::NotABox { operation, .. }
            | VmError::KeyNotFound { operation, .. }
            | VmError::UnknownItem { operation, .. }
            | VmError::ContainerFull { operation, .. } => operation,
        }
    }
}

/// Error category for filtering and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Protocol,
    Store,
    Builtin,
    Capacity,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Protocol => write!(f, "protocol"),
            ErrorCategory::Store => write!(f, "store"),
            ErrorCategory::Builtin => write!(f, "builtin"),
            ErrorCategory::Capacity => write!(f, "capacity"),
        }
    }
}

/// Result type alias for machine operations.
pub type VmResult<T> = Result<T, VmError>;
