//! Initiative Tracker Unit Tests
//!
//! Scenario tests for:
//! - Turn advancement and round counting
//! - Tie handling when creatures share an initiative
//! - Turn preservation when creatures join or leave mid-combat
//! - Health clamping
//! - Reordering and re-rolls mid-combat
//! - Quick add and snapshot persistence

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::initiative::persistence;
use crate::core::initiative::{
    spawn_rows, CreatureForm, CreatureKind, EncounterSnapshot, InitiativeDice, QuickAddRow,
};
use crate::tests::common::*;

// ============================================================================
// Turn Cursor
// ============================================================================

#[cfg(test)]
mod turn_cursor_tests {
    use super::*;

    #[test]
    fn test_two_creatures_advance_and_wrap() {
        let (encounter, _) = create_encounter(&[("Knight", 20), ("Bandit", 10)]);

        let encounter = encounter.next_turn();
        assert_eq!(encounter.current_turn(), 1);
        assert_eq!(encounter.round(), 0);

        let encounter = encounter.next_turn();
        assert_eq!(encounter.current_turn(), 0);
        assert_eq!(encounter.round(), 1);
    }

    #[test]
    fn test_advance_on_empty_encounter_changes_nothing() {
        let encounter = advance(EncounterSnapshot::new(), 3);
        assert_eq!(encounter.current_turn(), 0);
        assert_eq!(encounter.round(), 0);
        assert_eq!(encounter, EncounterSnapshot::new());
    }

    #[test]
    fn test_previous_at_start_of_combat_is_noop() {
        let (encounter, _) = create_encounter(&[("Knight", 20), ("Bandit", 10)]);
        assert_eq!(encounter.clone().previous_turn(), encounter);
    }

    #[test]
    fn test_previous_returns_to_end_of_last_round() {
        let (encounter, ids) = create_encounter(&[("Knight", 20), ("Bandit", 10)]);
        let encounter = advance(encounter, 2).previous_turn();
        assert_eq!(encounter.round(), 0);
        assert_eq!(encounter.current_creature().unwrap().id(), ids[1]);
    }

    #[test]
    fn test_display_order_rotates_with_turn() {
        let (encounter, _) = create_encounter(&[("A", 20), ("B", 15), ("C", 10)]);
        let encounter = advance(encounter, 2);
        assert_eq!(display_names(&encounter), vec!["C", "A", "B"]);
        assert_eq!(names(&encounter), vec!["A", "B", "C"]);
    }
}

// ============================================================================
// Ties
// ============================================================================

#[cfg(test)]
mod tie_tests {
    use super::*;

    #[test]
    fn test_three_way_tie_keeps_insertion_order() {
        let a = create_monster("A", 1);
        let b = create_monster("B", 1);
        let c = create_monster("C", 1);
        let ids = [a.id(), b.id(), c.id()];

        let encounter = EncounterSnapshot::new()
            .add_creature(a)
            .add_creature(b)
            .add_creature(c);

        assert_eq!(encounter.order(), ids);
        let ranks: Vec<u32> = ids
            .iter()
            .map(|id| encounter.creature(*id).unwrap().tie_break())
            .collect();
        assert_eq!(ranks, vec![0, 1, 2]);
        assert_valid(&encounter);
    }

    #[test]
    fn test_changed_initiative_joins_end_of_tie_group() {
        let (encounter, ids) = create_encounter(&[("A", 20), ("B", 10), ("C", 1)]);
        let encounter = encounter.set_initiative(ids[2], 20);
        assert_eq!(names(&encounter), vec!["A", "C", "B"]);
        assert_eq!(encounter.creature(ids[2]).unwrap().tie_break(), 1);
    }

    #[test]
    fn test_deleting_from_tie_group_renumbers_ranks() {
        let (encounter, ids) = create_encounter(&[("A", 8), ("B", 8), ("C", 8)]);
        let encounter = encounter.delete_creature(ids[0]);
        assert_eq!(encounter.creature(ids[1]).unwrap().tie_break(), 0);
        assert_eq!(encounter.creature(ids[2]).unwrap().tie_break(), 1);
        assert_valid(&encounter);
    }
}

// ============================================================================
// Turn Preservation
// ============================================================================

#[cfg(test)]
mod turn_preservation_tests {
    use super::*;

    #[test]
    fn test_delete_creature_that_already_acted() {
        let (encounter, ids) = create_encounter(&[("C1", 20), ("C2", 10), ("C3", 5)]);
        let encounter = encounter.next_turn();
        assert_eq!(encounter.current_turn(), 1);

        let encounter = encounter.delete_creature(ids[0]);
        assert_eq!(encounter.current_turn(), 0);
        assert_eq!(encounter.order(), [ids[1], ids[2]]);
        assert_eq!(encounter.current_creature().unwrap().id(), ids[1]);
    }

    #[test]
    fn test_delete_at_top_of_round_leaves_turn() {
        let (encounter, ids) = create_encounter(&[("C1", 20), ("C2", 10), ("C3", 9)]);
        let encounter = advance(encounter, 3).delete_creature(ids[0]);
        assert_eq!((encounter.current_turn(), encounter.round()), (0, 1));
        assert_eq!(encounter.current_creature().unwrap().id(), ids[1]);
    }

    #[test]
    fn test_add_mid_round_follows_current_creature() {
        let (encounter, ids) = create_encounter(&[("Orc", 17), ("Elf", 15)]);
        let encounter = advance(encounter, 3);
        assert_eq!(encounter.current_creature().unwrap().id(), ids[1]);

        let encounter = encounter.add_creature(create_monster("Imp", 16));
        assert_eq!(names(&encounter), vec!["Orc", "Imp", "Elf"]);
        assert_eq!(encounter.current_turn(), 2);
        assert_eq!(encounter.round(), 1);
    }

    #[test]
    fn test_bulk_add_mid_round_follows_current_creature() {
        let (encounter, ids) = create_encounter(&[("Orc", 10), ("Elf", 5)]);
        let encounter = encounter.next_turn().add_creatures(vec![
            create_monster("Bat 1", 30),
            create_monster("Bat 2", 30),
            create_monster("Rat", 1),
        ]);
        assert_eq!(encounter.current_creature().unwrap().id(), ids[1]);
        assert_valid(&encounter);
    }

    #[test]
    fn test_duplicate_mid_round_follows_current_creature() {
        let (encounter, ids) = create_encounter(&[("Orc", 10), ("Elf", 5)]);
        let encounter = encounter.next_turn().duplicate_creature(ids[0]);
        assert_eq!(names(&encounter), vec!["Orc", "Orc", "Elf"]);
        assert_eq!(encounter.current_creature().unwrap().id(), ids[1]);
    }

    #[test]
    fn test_reroll_mid_round_keeps_index_and_players() {
        let hero = create_player("Hero", 14, 40);
        let hero_id = hero.id();
        let encounter = EncounterSnapshot::new()
            .add_creature(hero)
            .add_creatures((0..5).map(|i| create_monster(&format!("Kobold {i}"), 3)))
            .next_turn()
            .next_turn();

        let mut rng = StdRng::seed_from_u64(2024);
        let encounter = encounter.roll_monster_initiative(&mut rng, &InitiativeDice::default());
        assert_eq!(encounter.current_turn(), 2);
        assert_eq!(encounter.creature(hero_id).unwrap().initiative, 14);
        assert_valid(&encounter);
    }
}

// ============================================================================
// Health
// ============================================================================

#[cfg(test)]
mod health_tests {
    use super::*;

    #[test]
    fn test_massive_damage_clamps_to_zero() {
        let (encounter, ids) = create_encounter(&[("Ogre", 8)]);
        let encounter = encounter.adjust_health(ids[0], -1000);
        assert_eq!(encounter.creature(ids[0]).unwrap().current_hp, 0);
    }

    #[test]
    fn test_overhealing_clamps_to_max() {
        let (encounter, ids) = create_encounter(&[("Ogre", 8)]);
        let encounter = encounter.adjust_health(ids[0], -10).adjust_health(ids[0], 60);
        assert_eq!(encounter.creature(ids[0]).unwrap().current_hp, 30);
    }

    #[test]
    fn test_restart_restores_health() {
        let (encounter, ids) = create_encounter(&[("Ogre", 8), ("Imp", 3)]);
        let encounter = advance(encounter.adjust_health(ids[1], -29), 3).restart();
        assert_eq!(encounter.creature(ids[1]).unwrap().current_hp, 30);
        assert!(!encounter.is_started());
    }
}

// ============================================================================
// Full Encounter Flow
// ============================================================================

#[cfg(test)]
mod encounter_flow_tests {
    use super::*;

    #[test]
    fn test_quick_add_then_run_combat() {
        let rows = vec![
            QuickAddRow {
                form: CreatureForm {
                    name: "Skeleton".into(),
                    ac: "13".into(),
                    max_hp: "13".into(),
                    initiative: "12".into(),
                    initiative_mod: "2".into(),
                    kind: CreatureKind::Monster,
                },
                quantity: 3,
            },
            QuickAddRow {
                form: CreatureForm {
                    name: "Cleric".into(),
                    ac: "18".into(),
                    max_hp: "27".into(),
                    initiative: "15".into(),
                    initiative_mod: "".into(),
                    kind: CreatureKind::Player,
                },
                quantity: 1,
            },
        ];

        let encounter = EncounterSnapshot::new().add_creatures(spawn_rows(&rows).unwrap());
        assert_eq!(names(&encounter), vec!["Cleric", "Skeleton", "Skeleton", "Skeleton"]);

        // Cleric acts, first skeleton falls, the turn passes along
        let encounter = encounter.next_turn();
        let skeleton = encounter.order()[1];
        let encounter = encounter.adjust_health(skeleton, -13);
        assert!(encounter.creature(skeleton).unwrap().is_down());
        let encounter = encounter.next_turn().delete_creature(skeleton);
        assert_eq!(encounter.current_turn(), 1);
        assert_eq!(encounter.len(), 3);
        assert_valid(&encounter);
    }

    #[test]
    fn test_drag_from_display_positions_mid_round() {
        let (encounter, ids) =
            create_encounter(&[("C1", 20), ("C2", 10), ("C3", 5), ("C4", 2), ("C5", 1)]);
        let encounter = advance(encounter, 2);
        assert_eq!(display_names(&encounter), vec!["C3", "C4", "C5", "C1", "C2"]);

        // Drag C5 (display 2) onto C1 (display 3)
        let encounter = encounter.reorder_by_display_position(2, 3);
        assert_eq!(encounter.current_creature().unwrap().id(), ids[2]);
        assert_eq!(encounter.creature(ids[4]).unwrap().initiative, 20);
        assert_valid(&encounter);
    }

    #[test]
    fn test_snapshot_survives_persistence_mid_combat() {
        let (encounter, ids) = create_encounter(&[("A", 12), ("B", 12), ("C", 4)]);
        let encounter = advance(encounter.adjust_health(ids[1], -5), 4);

        let json = persistence::to_json(&encounter).unwrap();
        let restored = persistence::from_json(&json).unwrap();
        assert_eq!(restored, encounter);
        assert_eq!(restored.display_order(), encounter.display_order());
    }

    #[test]
    fn test_clear_resets_everything() {
        let (encounter, _) = create_encounter(&[("A", 12), ("B", 3)]);
        let encounter = advance(encounter, 5).clear();
        assert!(encounter.is_empty());
        assert_eq!((encounter.current_turn(), encounter.round()), (0, 0));
    }
}
