//! Shared test utilities for minecart integration tests.
//!
//! This module provides:
//! - Memory builders
//! - Configuration builders
//! - Assertion helpers for run outcomes
//!
//! ## AAA Pattern
//!
//! All tests follow the Arrange-Act-Assert pattern:
//! - Arrange: Set up the seed memory and configuration
//! - Act: Dispatch or run the driver
//! - Assert: Verify the rendered memory, the store and the outcome

#![allow(dead_code)]

use minecart_vm::*;

// =============================================================================
// Memory Builders
// =============================================================================

/// Build a chest from items, one `add_item` per entry.
pub fn chest(items: impl IntoIterator<Item = Item>) -> Inventory {
    let mut memory = Inventory::chest();
    for item in items {
        assert!(memory.add_item(item), "seed memory overflowed");
    }
    memory
}

/// A box holding `count` copies of `item`.
pub fn boxed(item: Item, count: usize) -> Item {
    box_items(&[item], count).into_item()
}

/// A continuation box holding a single paper token.
pub fn continuation(token: &str) -> Item {
    boxed(Item::paper(token), 1)
}

pub fn key() -> Item {
    Item::paper("key")
}

pub fn cobblestone() -> Item {
    Item::new("cobblestone")
}

pub fn stone() -> Item {
    Item::new("stone")
}

/// The contents of a boxed item.
///
/// # Panics
/// Panics if the item is not a box.
pub fn contents(item: &Item) -> &Inventory {
    item.inventory().expect("expected a box")
}

/// Rendered items in slot order, vacant slots skipped.
pub fn rendered(memory: &Inventory) -> Vec<String> {
    memory
        .items()
        .map(|(item, count)| if count == 1 { item.to_string() } else { format!("{} x{}", item, count) })
        .collect()
}

// =============================================================================
// Configuration Builders
// =============================================================================

/// Layout and grouping of the first minecart program, with a custom cap.
pub fn original_config(max_iterations: usize) -> MachineConfig {
    MachineConfig::original().with_max_iterations(max_iterations)
}

pub fn config_with_order(order: RestoreOrder) -> MachineConfig {
    MachineConfig::default().with_restore_order(order)
}

/// Run a memory to completion on the built-in table.
pub fn run(memory: &mut Inventory, config: MachineConfig) -> (RunReport, MachineContext) {
    let mut driver = Driver::new(config);
    let report = driver.run(memory);
    (report, driver.context().clone())
}

// =============================================================================
// Assertion Helpers
// =============================================================================

pub fn assert_halted(outcome: &RunOutcome, expected: usize) {
    assert_eq!(
        *outcome,
        RunOutcome::Halted { iterations: expected },
        "Expected Halted after {} iterations, got {:?}",
        expected,
        outcome
    );
}

pub fn assert_capped(outcome: &RunOutcome, expected: usize) {
    assert_eq!(
        *outcome,
        RunOutcome::IterationCap { iterations: expected },
        "Expected the cap at {} iterations, got {:?}",
        expected,
        outcome
    );
}

/// Assert a fault in dispatch `iteration` and hand back the error.
pub fn assert_faulted(outcome: &RunOutcome, iteration: usize) -> &VmError {
    match outcome {
        RunOutcome::Faulted { iteration: at, error } => {
            assert_eq!(*at, iteration, "fault in the wrong iteration: {}", error);
            error
        }
        _ => panic!("Expected Faulted, got {:?}", outcome),
    }
}
