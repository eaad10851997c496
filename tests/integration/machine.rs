//! Integration tests for the calling convention and opcode dispatch.
//!
//! Component: VM (router + convention)
//!
//! These tests verify:
//! - Operand popping and memory restoration over a real built-in
//! - Each restore order's layout
//! - Protocol faults raised before a function runs
//! - Custom operation tables built from boxed conventions

#![cfg(test)]

use crate::common::*;

use minecart_vm::*;

/// `[set(2), Box<cobblestone x3>, Box<key>, Box<get(2)>, stone]`
fn put_memory() -> Inventory {
    chest([
        Builtin::Set.descriptor(),
        boxed(cobblestone(), 3),
        boxed(key(), 1),
        continuation("get(2)"),
        stone(),
    ])
}

// =============================================================================
// Restore Order Tests
// =============================================================================

mod restore_orders {
    use super::*;

    fn dispatch_put(order: RestoreOrder) -> (Inventory, MachineContext) {
        let router = Router::builtins();
        let mut memory = put_memory();
        let mut ctx = MachineContext::new(config_with_order(order));

        let matched = router.dispatch(&mut memory, &mut ctx).unwrap();
        assert_eq!(matched, Some(&Builtin::Set.descriptor()));
        (memory, ctx)
    }

    #[test]
    fn state_then_box() {
        // Act
        let (memory, ctx) = dispatch_put(RestoreOrder::StateThenBox);

        // Assert: next token first, saved state, the box, then both results
        assert_eq!(
            rendered(&memory),
            vec![
                "paper: \"get(2)\"",
                "stone",
                "Box <[(paper: \"set(2)\")]>",
                "Box <[]>",
                "Box <[]>",
            ]
        );
        assert_eq!(ctx.store.get(&key()).map(Inventory::total_count), Some(3));
    }

    #[test]
    fn box_then_state() {
        let (memory, _) = dispatch_put(RestoreOrder::BoxThenState);
        assert_eq!(
            rendered(&memory),
            vec![
                "paper: \"get(2)\"",
                "Box <[(paper: \"set(2)\")]>",
                "stone",
                "Box <[]>",
                "Box <[]>",
            ]
        );
    }

    #[test]
    fn results_then_box() {
        let (memory, _) = dispatch_put(RestoreOrder::ResultsThenBox);
        assert_eq!(
            rendered(&memory),
            vec![
                "paper: \"get(2)\"",
                "stone",
                "Box <[]>",
                "Box <[]>",
                "Box <[(paper: \"set(2)\")]>",
            ]
        );
    }

    #[test]
    fn every_order_conserves_top_level_items() {
        for order in [RestoreOrder::StateThenBox, RestoreOrder::BoxThenState, RestoreOrder::ResultsThenBox] {
            let (memory, _) = dispatch_put(order);
            // Opcode and two argument boxes in; next token, the box and two results out.
            assert_eq!(memory.total_count(), put_memory().total_count(), "{:?}", order);
        }
    }
}

// =============================================================================
// Protocol Fault Tests
// =============================================================================

mod protocol_faults {
    use super::*;

    #[test]
    fn empty_continuation_after_put() {
        // Arrange: a put whose results leave an empty box where get expects its continuation
        let router = Router::builtins();
        let mut memory = put_memory();
        let mut ctx = MachineContext::default();
        router.dispatch(&mut memory, &mut ctx).unwrap();

        // Act
        let err = router.dispatch(&mut memory, &mut ctx).unwrap_err();

        // Assert
        assert_eq!(err, VmError::missing_operand("get(2)", OperandSlot::ContinuationToken));
        assert_eq!(err.category(), ErrorCategory::Protocol);
    }

    #[test]
    fn lone_opcode_is_missing_its_arguments() {
        let mut memory = chest([Builtin::Smelt.descriptor()]);
        let err = Router::builtins()
            .dispatch(&mut memory, &mut MachineContext::default())
            .unwrap_err();
        assert_eq!(err, VmError::missing_operand("smelt(1)", OperandSlot::Argument(0)));
    }

    #[test]
    fn continuation_must_be_boxed() {
        let mut memory = chest([Builtin::Smelt.descriptor(), boxed(cobblestone(), 1), Item::paper("halt")]);
        let err = Router::builtins()
            .dispatch(&mut memory, &mut MachineContext::default())
            .unwrap_err();
        assert!(matches!(err, VmError::NotABox { slot: OperandSlot::ContinuationBox, .. }));
        assert_eq!(err.code(), 1002);
    }

    #[test]
    fn non_opcode_memory_is_untouched() {
        let mut memory = chest([Item::paper("halt"), boxed(cobblestone(), 4)]);
        let before = memory.clone();
        let router = Router::builtins();
        let matched = router.dispatch(&mut memory, &mut MachineContext::default()).unwrap();
        assert!(matched.is_none());
        assert_eq!(memory, before);
    }
}

// =============================================================================
// Custom Table Tests
// =============================================================================

mod custom_tables {
    use super::*;

    fn custom_router() -> Router<Box<dyn Operation>> {
        let double = Convention::new("double(1)", |_ctx: &mut MachineContext, [item]: [Item; 1]| {
            Ok(vec![item.clone(), item])
        });
        let swap = Convention::new("swap(2)", |_ctx: &mut MachineContext, [a, b]: [Item; 2]| Ok(vec![b, a]));
        Router::new()
            .route(Item::paper("double(1)"), Box::new(double) as Box<dyn Operation>)
            .route(Item::paper("swap(2)"), Box::new(swap) as Box<dyn Operation>)
    }

    #[test]
    fn mixed_arities_share_one_table() {
        // Arrange
        let router = custom_router();
        let mut memory = chest([
            Item::paper("swap(2)"),
            Item::new("dirt"),
            Item::new("sand"),
            continuation("double(1)"),
            continuation("halt"),
        ]);
        let mut ctx = MachineContext::default();

        // Act: swap hands control to double, which doubles the saved box
        router.dispatch(&mut memory, &mut ctx).unwrap();
        let matched = router.dispatch(&mut memory, &mut ctx).unwrap();

        // Assert
        assert_eq!(matched, Some(&Item::paper("double(1)")));
        assert_eq!(
            rendered(&memory),
            vec![
                "paper: \"swap(2)\"",
                "sand",
                "dirt",
                "Box <[(paper: \"double(1)\")]>",
                "Box <[(paper: \"halt\")]>",
                "Box <[(paper: \"halt\")]>",
            ]
        );
    }

    #[test]
    fn driver_accepts_custom_router() {
        let mut memory = chest([Item::paper("double(1)"), stone(), continuation("halt")]);
        let mut driver = Driver::with_router(custom_router(), MachineContext::default());

        let report = driver.run(&mut memory);

        assert_halted(&report.outcome, 1);
        assert_eq!(memory.count_of(&stone()), 2);
        assert_eq!(driver.router().routes().len(), 2);
    }
}
