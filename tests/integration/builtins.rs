//! Integration tests for the built-in operations.
//!
//! Component: Standard library (store, furnace, permute)
//!
//! These tests verify:
//! - The store round trip through `set(2)` and `get(2)` dispatches
//! - Furnace substitution, including custom tables
//! - Permute grouping under each chunk policy

#![cfg(test)]

use crate::common::*;

use minecart_vm::*;

// =============================================================================
// Store Tests
// =============================================================================

mod store {
    use super::*;

    #[test]
    fn put_then_get_restores_items() {
        // Arrange: set(2) continues into get(2); the results line up as get's arguments
        let mut memory = chest([
            Builtin::Set.descriptor(),
            boxed(cobblestone(), 10),
            boxed(key(), 2),
            continuation("get(2)"),
        ]);
        let router = Router::builtins();
        let mut ctx = MachineContext::new(config_with_order(RestoreOrder::ResultsThenBox));

        // Act
        router.dispatch(&mut memory, &mut ctx).unwrap();
        assert_eq!(ctx.store.get(&key()).map(Inventory::total_count), Some(10));
        router.dispatch(&mut memory, &mut ctx).unwrap();

        // Assert: the entry is gone and the items are back in their box
        assert!(ctx.store.is_empty());
        assert_eq!(
            rendered(&memory),
            vec![
                "paper: \"set(2)\"",
                "Box <[(cobblestone, 10)]>",
                "Box <[(paper: \"key\", 2)]>",
                "Box <[(paper: \"get(2)\")]>",
            ]
        );
    }

    #[test]
    fn get_of_unknown_key_faults() {
        let mut memory = chest([
            Builtin::Get.descriptor(),
            boxed(stone(), 1),
            boxed(key(), 1),
            continuation("halt"),
        ]);
        let err = Router::builtins()
            .dispatch(&mut memory, &mut MachineContext::default())
            .unwrap_err();

        assert_eq!(err, VmError::key_not_found("get(2)", key()));
        assert_eq!(err.category(), ErrorCategory::Store);
    }

    #[test]
    fn separate_keys_keep_separate_entries() {
        let mut ctx = MachineContext::default();
        stdlib::store_put(&mut ctx, [boxed(cobblestone(), 2), boxed(Item::paper("a"), 1)]).unwrap();
        stdlib::store_put(&mut ctx, [boxed(stone(), 5), boxed(Item::paper("b"), 1)]).unwrap();

        assert_eq!(ctx.store.len(), 2);
        assert_eq!(ctx.store.get(&Item::paper("a")).map(|inv| inv.count_of(&cobblestone())), Some(2));
        assert_eq!(ctx.store.get(&Item::paper("b")).map(|inv| inv.count_of(&stone())), Some(5));
        let keys: Vec<_> = ctx.store.keys().map(Item::label).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}

// =============================================================================
// Furnace Tests
// =============================================================================

mod furnace {
    use super::*;

    #[test]
    fn smelts_a_full_box() {
        let mut ctx = MachineContext::default();
        let out = stdlib::smelt(&mut ctx, [boxed(cobblestone(), 64)]).unwrap();
        assert_eq!(contents(&out[0]).to_string(), "[(stone, 64)]");
    }

    #[test]
    fn custom_table_replaces_default() {
        let furnace = SubstitutionTable::new()
            .with_entry(Item::new("sand"), Item::new("glass"))
            .with_entry(cobblestone(), stone());
        let mut ctx = MachineContext::default().with_furnace(furnace);

        let input = box_items(&[Item::new("sand"), cobblestone()], 2).into_item();
        let out = stdlib::smelt(&mut ctx, [input]).unwrap();

        assert_eq!(contents(&out[0]).to_string(), "[(glass, 2),(stone, 2)]");
    }

    #[test]
    fn unknown_item_aborts_the_call() {
        let mut memory = chest([
            Builtin::Smelt.descriptor(),
            box_items(&[cobblestone(), Item::new("dirt")], 1).into_item(),
            continuation("halt"),
        ]);
        let err = Router::builtins()
            .dispatch(&mut memory, &mut MachineContext::default())
            .unwrap_err();
        assert_eq!(err, VmError::unknown_item("smelt(1)", "dirt"));
        assert_eq!(err.code(), 3001);
    }
}

// =============================================================================
// Permute Tests
// =============================================================================

mod permute {
    use super::*;

    fn groups(chunking: ChunkPolicy) -> Vec<String> {
        let mut memory = Program::PermuteGroups.seed();
        let config = MachineConfig::default().with_chunking(chunking);
        let (report, _) = run(&mut memory, config);
        assert_halted(&report.outcome, 1);
        // Skip the next token and the returned continuation box.
        rendered(&memory).into_iter().skip(2).collect()
    }

    #[test]
    fn run_length_groups() {
        assert_eq!(
            groups(ChunkPolicy::RunLength),
            vec![
                "Box <[(cobblestone)]>",
                "Box <[(cobblestone, 4)]>",
                "Box <[(cobblestone, 4)]>",
                "Box <[(cobblestone)]>",
                "Box <[(cobblestone)]>",
                "Box <[(cobblestone)]>",
                "Box <[(cobblestone)]>",
                "Box <[(stone, 13)]>",
            ]
        );
    }

    #[test]
    fn fixed_groups_cross_item_boundaries() {
        let groups = groups(ChunkPolicy::Fixed(3));
        assert_eq!(groups.len(), 8);
        assert_eq!(groups[4], "Box <[(cobblestone),(stone, 2)]>");
        assert_eq!(groups[7], "Box <[(stone, 5)]>");
    }

    #[test]
    fn original_group_size_swallows_the_pool() {
        let groups = groups(ChunkPolicy::Fixed(ChunkPolicy::ORIGINAL_GROUP_SIZE));
        assert_eq!(groups, vec!["Box <[(cobblestone, 13),(stone, 13)]>"]);
    }

    #[test]
    fn continuation_follows_permute() {
        let mut memory = Program::PermuteGroups.seed();
        run(&mut memory, MachineConfig::default());
        let layout = rendered(&memory);
        assert_eq!(layout[0], "paper: \"halt\"");
        assert_eq!(layout[1], "Box <[(paper: \"permute(27)\")]>");
    }
}
